//! Renderable pane state
//!
//! A [`DisplayState`] is derived entirely from one [`DeviceSnapshot`] and
//! replaced as a whole on every update.

use chrono::{DateTime, Local};

use bcozy_core::{DeviceSnapshot, Localization};

/// Color role of a pane's icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    /// Device reports activity (consuming power, switched on, ...)
    Active,
    Idle,
    /// No data available
    Disabled,
}

/// Icon shown in the pane header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitIcon {
    Power,
    PowerOff,
    SwitchOn,
    SwitchOff,
    Motion,
    NoMotion,
    Heating,
    Thermometer,
}

/// Icon, tint and tooltip of one activity state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub icon: UnitIcon,
    pub tint: Tint,
    pub tooltip_key: &'static str,
}

/// Maps a device's binary activity to its presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityRule {
    pub active: Presentation,
    pub idle: Presentation,
}

impl ActivityRule {
    pub const fn new(active: Presentation, idle: Presentation) -> Self {
        Self { active, idle }
    }

    pub fn presentation(&self, active: bool) -> Presentation {
        if active {
            self.active
        } else {
            self.idle
        }
    }
}

/// Text that is either fixed or looked up in the current locale at render time
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayText {
    Raw(String),
    Localized(&'static str),
}

impl DisplayText {
    pub fn resolve(&self, localization: &Localization) -> String {
        match self {
            DisplayText::Raw(text) => text.clone(),
            DisplayText::Localized(key) => localization.text(key),
        }
    }
}

impl From<String> for DisplayText {
    fn from(text: String) -> Self {
        DisplayText::Raw(text)
    }
}

/// Labeled value in the expanded pane body
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub label_key: &'static str,
    pub value: DisplayText,
}

impl DetailRow {
    pub fn new(label_key: &'static str, value: impl Into<DisplayText>) -> Self {
        Self {
            label_key,
            value: value.into(),
        }
    }
}

/// Everything a pane widget needs to draw itself
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub title: String,
    pub location: Option<String>,
    /// Short value next to the icon
    pub headline: DisplayText,
    pub details: Vec<DetailRow>,
    pub icon: UnitIcon,
    pub tint: Tint,
    pub tooltip_key: &'static str,
    pub active: bool,
    pub enabled: bool,
    pub updated_at: DateTime<Local>,
}

impl DisplayState {
    /// Base state for `snapshot` before the device kind fills in values
    pub(crate) fn base(snapshot: &DeviceSnapshot, presentation: Presentation, active: bool) -> Self {
        Self {
            title: snapshot.label.clone(),
            location: snapshot.location.clone(),
            headline: DisplayText::Raw(String::new()),
            details: Vec::new(),
            icon: presentation.icon,
            tint: presentation.tint,
            tooltip_key: presentation.tooltip_key,
            active,
            enabled: true,
            updated_at: snapshot.timestamp,
        }
    }
}
