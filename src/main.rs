use anyhow::Result;
use clap::Parser;
use protista_lib::cli::{execute, Args};
use protista_lib::EngineConfig;

fn main() -> Result<()> {
    let args = Args::parse();

    let config = EngineConfig::load(&args.config)?;
    protista_core::init_logging(&config.logging.level);
    tracing::debug!(fingerprint = %config.fingerprint(), "Loaded configuration");

    let output = execute(&args.command, &config)?;
    println!("{output}");
    Ok(())
}
