//! HTTP service: the web UI plus a JSON API over the pipeline.
//!
//! Credentials travel in each request body and are never stored. Pipeline
//! work is synchronous, so every handler runs it on a blocking worker.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
