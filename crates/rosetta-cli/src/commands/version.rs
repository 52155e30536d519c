//! Version command.

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("rosetta {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
