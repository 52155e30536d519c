//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rosetta::config::DEFAULT_CONFIG_FILE;

/// Rosetta: legacy-to-agent semantic mapper
#[derive(Parser)]
#[command(name = "rosetta")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default rosetta_map.yaml
    Init {
        /// Path to write the configuration to
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },

    /// Report columns, enums, and PII for each whitelisted table
    Inspect {
        /// Path to rosetta_map.yaml
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },

    /// Infer semantics and write models, repositories, audit log, and function schemas
    Generate {
        /// Path to rosetta_map.yaml
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Directory to write generated files
        #[arg(short, long = "output-dir", default_value = "generated")]
        output_dir: PathBuf,

        /// Format generated Rust files with rustfmt
        #[arg(long)]
        format: bool,
    },

    /// Print the version
    Version,

    /// Start the web UI and HTTP API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for web server
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },
}
