//! Domain types shared by every bcozy crate
//!
//! A [`DeviceSnapshot`] is the unit of exchange between the middleware and
//! the UI: one complete, self-consistent view of a unit's observable state.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Label shown when a unit's data could not be fetched.
pub const UNKNOWN_ID: &str = "UNKNOWN_ID";

/// Identifier of a unit in the middleware registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UnitId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&UnitId> for UnitId {
    fn from(id: &UnitId) -> Self {
        id.clone()
    }
}

/// Device kinds the client knows how to present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    PowerConsumptionSensor,
    PowerSwitch,
    MotionDetector,
    TemperatureSensor,
}

impl UnitKind {
    pub const ALL: [UnitKind; 4] = [
        UnitKind::PowerConsumptionSensor,
        UnitKind::PowerSwitch,
        UnitKind::MotionDetector,
        UnitKind::TemperatureSensor,
    ];

    /// State carried by a unit of this kind before any data is known
    pub fn default_state(self) -> UnitState {
        match self {
            UnitKind::PowerConsumptionSensor => {
                UnitState::PowerConsumption(PowerConsumptionState::default())
            }
            UnitKind::PowerSwitch => UnitState::PowerSwitch(PowerSwitchState::default()),
            UnitKind::MotionDetector => UnitState::Motion(MotionState::default()),
            UnitKind::TemperatureSensor => UnitState::Temperature(TemperatureState::default()),
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitKind::PowerConsumptionSensor => "power consumption sensor",
            UnitKind::PowerSwitch => "power switch",
            UnitKind::MotionDetector => "motion detector",
            UnitKind::TemperatureSensor => "temperature sensor",
        };
        f.write_str(name)
    }
}

/// Power consumption measurement
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PowerConsumptionState {
    /// Instantaneous power in watts
    pub current: f64,
    /// Cumulative consumption in kilowatt hours
    pub consumption: f64,
    /// Line voltage in volts
    pub voltage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PowerSwitchState {
    pub on: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MotionState {
    pub detected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureState {
    pub celsius: f64,
    pub target_celsius: f64,
}

impl Default for TemperatureState {
    fn default() -> Self {
        Self {
            celsius: 0.0,
            target_celsius: 0.0,
        }
    }
}

/// Kind-specific state carried by a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitState {
    PowerConsumption(PowerConsumptionState),
    PowerSwitch(PowerSwitchState),
    Motion(MotionState),
    Temperature(TemperatureState),
}

impl UnitState {
    pub fn kind(&self) -> UnitKind {
        match self {
            UnitState::PowerConsumption(_) => UnitKind::PowerConsumptionSensor,
            UnitState::PowerSwitch(_) => UnitKind::PowerSwitch,
            UnitState::Motion(_) => UnitKind::MotionDetector,
            UnitState::Temperature(_) => UnitKind::TemperatureSensor,
        }
    }
}

/// Immutable view of one unit's state at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub unit_id: UnitId,
    pub label: String,
    /// Label of the location (room) the unit is placed in
    pub location: Option<String>,
    pub timestamp: DateTime<Local>,
    pub state: UnitState,
}

impl DeviceSnapshot {
    pub fn new(unit_id: impl Into<UnitId>, label: impl Into<String>, state: UnitState) -> Self {
        Self {
            unit_id: unit_id.into(),
            label: label.into(),
            location: None,
            timestamp: Local::now(),
            state,
        }
    }

    /// Snapshot rendered when the real data is unavailable
    pub fn placeholder(unit_id: impl Into<UnitId>, kind: UnitKind) -> Self {
        Self::new(unit_id, UNKNOWN_ID, kind.default_state())
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_state(mut self, state: UnitState) -> Self {
        self.state = state;
        self.timestamp = Local::now();
        self
    }

    pub fn kind(&self) -> UnitKind {
        self.state.kind()
    }

    pub fn power_consumption(&self) -> Option<&PowerConsumptionState> {
        match &self.state {
            UnitState::PowerConsumption(s) => Some(s),
            _ => None,
        }
    }
}

/// Authorization group as listed by the middleware
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: String,
    pub label: String,
}

impl GroupRecord {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}
