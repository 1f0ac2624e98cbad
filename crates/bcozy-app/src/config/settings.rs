//! Settings parser for config.toml

use std::path::{Path, PathBuf};

use super::types::Settings;
use bcozy_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "bcozy";

const DEFAULT_CONFIG: &str = r#"# bcozy configuration

[ui]
# "unicode" or "nerd_fonts"
icons = "unicode"
# "english" or "german"
language = "english"
# Seconds an info notice stays visible
notice_secs = 5
menu_maximized = true

[simulation]
# Publish periodic state changes for every unit
enabled = true
update_interval_ms = 1000
group_latency_ms = 150
initial_groups = ["Admins"]
# Units whose data is missing at startup / that refuse observers
unsynchronized = []
unreachable = []

# Without any [[simulation.units]] entry a demo home is simulated.
# [[simulation.units]]
# id = "pcs-kitchen-kettle"
# label = "Kettle"
# location = "Kitchen"
# kind = "power_consumption_sensor"  # power_switch, motion_detector, temperature_sensor
"#;

/// `<config_dir>/bcozy/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `config_path`, falling back to defaults
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Write a commented default config file.
///
/// Returns false if a file already exists at `config_path`.
pub fn init_config_file(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", parent, e)))?;
    }
    std::fs::write(config_path, DEFAULT_CONFIG)?;
    info!("Created default config at {:?}", config_path);
    Ok(true)
}
