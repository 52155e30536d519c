//! Init command - write a default rosetta_map.yaml.

use std::path::PathBuf;

use colored::Colorize;
use rosetta::config::{write_default_rosetta_map, DEFAULT_PROJECT_NAME};

pub fn run(config: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    write_default_rosetta_map(&config, DEFAULT_PROJECT_NAME)?;

    println!(
        "{} {}",
        "Wrote".green().bold(),
        config.display().to_string().white()
    );
    println!(
        "Set {} and add tables to {} before running {}",
        "DATABASE_URL".cyan(),
        "whitelist_tables".cyan(),
        "rosetta generate".cyan().bold()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rosetta_map.yaml");

        run(path.clone()).unwrap();
        let err = run(path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
