//! API request handlers.

mod connect;
mod generate;
mod health;
mod inspect;

pub use connect::*;
pub use generate::*;
pub use health::*;
pub use inspect::*;

use std::sync::Arc;
use std::time::Duration;

use rosetta::DataSource;

use crate::server::error::ApiError;

/// How long a request waits on a locked SQLite database.
const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Open the database named in a request.
///
/// Must run on a blocking worker: a PostgreSQL source drives its own runtime.
fn open_source(database_url: &str) -> Result<Arc<dyn DataSource>, ApiError> {
    if database_url.trim().is_empty() {
        return Err(ApiError::BadRequest("database_url is required".to_string()));
    }
    Ok(rosetta::source::connect(database_url, BUSY_TIMEOUT)?)
}
