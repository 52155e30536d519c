//! CLI command implementations.

pub mod generate;
pub mod init;
pub mod inspect;
pub mod serve;
pub mod version;

use std::sync::Arc;
use std::time::Duration;

use rosetta::config::RosettaMap;
use rosetta::DataSource;

/// Open the configured database.
fn open_source(map: &RosettaMap) -> rosetta::Result<Arc<dyn DataSource>> {
    rosetta::source::connect(
        &map.database.connection_string,
        Duration::from_millis(map.database.busy_timeout_ms),
    )
}
