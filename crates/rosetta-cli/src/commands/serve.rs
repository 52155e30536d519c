//! Serve command - run the web UI and HTTP API.

use colored::Colorize;
use rosetta::Settings;

use crate::server::{app, state::AppState};

pub fn run(host: String, port: u16, settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(settings);

    let url = format!("http://{}:{}", host, port);
    println!();
    println!(
        "{} {}",
        "Starting Rosetta server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, &host, port))
}
