//! Writing generated artifacts to disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::error::{Result, RosettaError};

/// Write a generated file, creating parent directories as needed.
///
/// With `format` set, `rustfmt` is run on the written file. A missing or
/// failing formatter is logged and otherwise ignored; the unformatted file
/// stays in place.
pub fn write_generated_file(path: impl AsRef<Path>, content: &str, format: bool) -> Result<PathBuf> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| RosettaError::OutputWrite {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    fs::write(path, content).map_err(|e| RosettaError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "wrote generated file");

    if format {
        format_file(path);
    }

    Ok(path.to_path_buf())
}

fn format_file(path: &Path) {
    match Command::new("rustfmt").arg("--edition").arg("2021").arg(path).status() {
        Ok(status) if status.success() => {
            debug!(path = %path.display(), "formatted with rustfmt");
        }
        Ok(status) => {
            warn!(path = %path.display(), %status, "rustfmt reported a failure; keeping unformatted output");
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not run rustfmt; keeping unformatted output");
        }
    }
}
