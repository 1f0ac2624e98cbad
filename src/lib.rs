//! bcozy - terminal client for the BCO home-automation middleware
//!
//! Entry points for the two frontends. Both install error reporting and
//! file logging, load the settings and hand them to a [`bcozy_app::Engine`].

pub mod headless;

use std::path::Path;

use bcozy_app::config::{load_settings, Settings};
use bcozy_core::prelude::*;

/// Run the terminal UI
pub async fn run(config_path: &Path) -> Result<()> {
    let settings = init(config_path)?;
    let result = bcozy_tui::run(settings).await;
    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }
    info!("bcozy exiting");
    result
}

/// Run without a terminal UI, printing engine events as JSON lines
pub async fn run_headless(config_path: &Path) -> Result<()> {
    let settings = init(config_path)?;
    headless::runner::run_headless(settings).await
}

fn init(config_path: &Path) -> Result<Settings> {
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;
    bcozy_core::logging::init()?;

    info!("Config: {}", config_path.display());
    let settings = load_settings(config_path);
    info!(
        "Loaded settings: language={}, {} simulated units",
        settings.ui.language,
        settings.simulation.units.len()
    );
    Ok(settings)
}
