//! Rosetta CLI - legacy-to-agent semantic mapper.

mod cli;
mod commands;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};
use rosetta::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "rosetta=debug,rosetta_cli=debug,tower_http=debug"
    } else {
        "rosetta=info,rosetta_cli=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Environment and .env are read once, here, and passed down.
    let settings = Settings::from_env();

    let result = match cli.command {
        Commands::Init { config } => commands::init::run(config),

        Commands::Inspect { config } => commands::inspect::run(config, &settings),

        Commands::Generate {
            config,
            output_dir,
            format,
        } => commands::generate::run(config, output_dir, format, &settings, cli.verbose),

        Commands::Version => commands::version::run(),

        Commands::Serve { host, port } => commands::serve::run(host, port, settings),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
