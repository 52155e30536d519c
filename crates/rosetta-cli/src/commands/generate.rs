//! Generate command - infer semantics and write all artifacts.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use rosetta::config::load_rosetta_map;
use rosetta::llm::create_provider;
use rosetta::{Pipeline, PipelineOptions, Settings};

use super::open_source;

pub fn run(
    config: PathBuf,
    output_dir: PathBuf,
    format: bool,
    settings: &Settings,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let map = load_rosetta_map(&config, settings)?;

    let tables = &map.whitelist_tables;
    if tables.is_empty() {
        println!("No tables in whitelist.");
        return Ok(());
    }

    let kind = map.llm_config.provider;
    let provider = create_provider(
        kind,
        map.llm_config.to_llm_config(),
        settings.api_key_for(kind),
    )?;
    let source = open_source(&map)?;

    println!(
        "{} {} tables with {} ({})",
        "Generating".cyan().bold(),
        tables.len(),
        provider.name(),
        map.llm_config.model()
    );

    let pipeline = Pipeline::from_parts(source, Arc::from(provider))
        .with_options(PipelineOptions::from(&map.privacy));
    let report = pipeline.generate(tables)?;

    if verbose {
        println!();
        println!("{}", "Columns:".yellow().bold());
        for row in &report.audit_rows {
            println!("  {:20} {:24} {}", row.table_name, row.original_name, row.display_label);
        }
        println!();
    }

    let written = report.artifacts.write_to(&output_dir, format)?;
    for path in &written {
        println!("  {}", path.display());
    }

    if !report.failures.is_empty() {
        println!();
        println!(
            "{} {} tables:",
            "Skipped".yellow().bold(),
            report.failures.len()
        );
        for failure in &report.failures {
            println!("  {}: {}", failure.table, failure.error);
        }
    }

    println!();
    println!(
        "{} {}",
        "Wrote".green().bold(),
        output_dir.display().to_string().white()
    );

    Ok(())
}
