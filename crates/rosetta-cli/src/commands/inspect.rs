//! Inspect command - report what the pipeline would see in each table.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use rosetta::config::load_rosetta_map;
use rosetta::llm::MockProvider;
use rosetta::{Pipeline, PipelineOptions, Settings};

use super::open_source;

pub fn run(config: PathBuf, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let map = load_rosetta_map(&config, settings)?;
    let source = open_source(&map)?;
    println!(
        "{} {} database.",
        "Connected to".cyan().bold(),
        source.name().white()
    );

    let tables = &map.whitelist_tables;
    println!("Found {} tables in whitelist.", tables.len());

    // Inspection never reaches the oracle.
    let pipeline = Pipeline::from_parts(source, Arc::new(MockProvider::new()))
        .with_options(PipelineOptions::from(&map.privacy));

    for (table, result) in pipeline.inspect(tables) {
        let summary = match result {
            Ok(summary) => summary,
            Err(e) => {
                eprintln!("{} {}: {}", "Skipped".yellow().bold(), table, e);
                continue;
            }
        };

        println!(
            "{} Table {} has {} columns.",
            "[!]".yellow(),
            table.white().bold(),
            summary.column_count
        );
        if summary.enum_count > 0 {
            println!(
                "{} Detected {} potential Enums in {}.",
                "[i]".blue(),
                summary.enum_count,
                table
            );
        }
        if summary.pii_count > 0 {
            println!(
                "{} Detected {} potential PII columns in {}.",
                "[i]".blue(),
                summary.pii_count,
                table
            );
        }
    }

    Ok(())
}
