// src/bin/cli.rs
use color_eyre::eyre::{Result, eyre};

fn main() -> Result<()> {
    color_eyre::install()?;
    sietch_watch::cli::run().map_err(|e| eyre!(e.to_string()))
}
