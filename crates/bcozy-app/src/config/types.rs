//! Configuration types

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use bcozy_core::Locale;
use bcozy_remote::sim::{default_units, SimulationOptions, UnitSpec};

/// Complete settings from config.toml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub simulation: SimulationSettings,
}

/// Icon rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconMode {
    /// Safe Unicode characters that work in all terminals
    #[default]
    Unicode,
    /// Nerd Font glyphs, requires a Nerd Font in the terminal
    NerdFonts,
}

impl std::fmt::Display for IconMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IconMode::Unicode => write!(f, "unicode"),
            IconMode::NerdFonts => write!(f, "nerd_fonts"),
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    /// Icon mode: "unicode" (default) or "nerd_fonts"
    #[serde(default)]
    pub icons: IconMode,

    /// Display language: "english" / "en" or "german" / "de"
    #[serde(default)]
    pub language: Locale,

    /// Seconds an info notice stays visible
    #[serde(default = "default_notice_secs")]
    pub notice_secs: u64,

    /// Start with the main menu maximized
    #[serde(default = "default_true")]
    pub menu_maximized: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            icons: IconMode::default(),
            language: Locale::default(),
            notice_secs: default_notice_secs(),
            menu_maximized: true,
        }
    }
}

impl UiSettings {
    pub fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_secs.max(1))
    }
}

/// Simulated middleware settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Whether units publish periodic state changes
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,

    /// Round-trip delay of group registry operations
    #[serde(default = "default_group_latency_ms")]
    pub group_latency_ms: u64,

    #[serde(default = "default_units")]
    pub units: Vec<UnitSpec>,

    /// Unit ids whose data is not synchronized at startup
    #[serde(default)]
    pub unsynchronized: Vec<String>,

    /// Unit ids that refuse fetches and observers
    #[serde(default)]
    pub unreachable: Vec<String>,

    #[serde(default = "default_initial_groups")]
    pub initial_groups: Vec<String>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            update_interval_ms: default_update_interval_ms(),
            group_latency_ms: default_group_latency_ms(),
            units: default_units(),
            unsynchronized: Vec::new(),
            unreachable: Vec::new(),
            initial_groups: default_initial_groups(),
        }
    }
}

impl SimulationSettings {
    pub fn options(&self) -> SimulationOptions {
        SimulationOptions {
            update_interval: Duration::from_millis(self.update_interval_ms.max(50)),
            drive: self.enabled,
            unsynchronized: self.unsynchronized.iter().cloned().collect::<HashSet<_>>(),
            unreachable: self.unreachable.iter().cloned().collect::<HashSet<_>>(),
            group_latency: Duration::from_millis(self.group_latency_ms),
            initial_groups: self.initial_groups.clone(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_notice_secs() -> u64 {
    5
}

fn default_update_interval_ms() -> u64 {
    1000
}

fn default_group_latency_ms() -> u64 {
    150
}

fn default_initial_groups() -> Vec<String> {
    vec!["Admins".to_string()]
}
