//! bcozy - terminal client for the BCO home-automation middleware
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;

use bcozy_app::config::{default_config_path, init_config_file};
use bcozy_core::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "bcozy")]
#[command(about = "Monitor units and manage authorization groups from the terminal", long_about = None)]
struct Args {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run in headless mode (JSON output, no TUI)
    #[arg(long)]
    headless: bool,

    /// Write a commented default configuration and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args
        .config
        .or_else(default_config_path)
        .unwrap_or_else(|| PathBuf::from("bcozy.toml"));

    if args.init_config {
        if init_config_file(&config_path)? {
            eprintln!("Wrote default configuration to {}", config_path.display());
        } else {
            eprintln!("Configuration already exists at {}", config_path.display());
        }
        return Ok(());
    }

    if args.headless {
        bcozy::run_headless(&config_path).await
    } else {
        bcozy::run(&config_path).await
    }
}
