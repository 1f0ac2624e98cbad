//! Per-kind behavior of unit panes

use bcozy_core::prelude::*;
use bcozy_core::{DeviceSnapshot, UnitKind, UnitState};
use bcozy_remote::UnitRemote;

use super::display::{
    ActivityRule, DetailRow, DisplayState, DisplayText, Presentation, Tint, UnitIcon,
};

/// What a device kind contributes to its pane
pub trait UnitCapability: Send + Sync {
    fn kind(&self) -> UnitKind;

    fn activity_rule(&self) -> &'static ActivityRule;

    fn is_active(&self, snapshot: &DeviceSnapshot) -> bool;

    /// Fill headline and detail rows for `snapshot`
    fn render_snapshot(&self, display: &mut DisplayState, snapshot: &DeviceSnapshot);

    /// Fetch the unit's current data, rejecting data of another kind
    fn fetch_snapshot(&self, remote: &dyn UnitRemote) -> Result<DeviceSnapshot> {
        let snapshot = remote.fetch_current_snapshot()?;
        if snapshot.kind() != self.kind() {
            return Err(Error::fetch(
                remote.unit_id(),
                format!("expected {} data, got {}", self.kind(), snapshot.kind()),
            ));
        }
        Ok(snapshot)
    }
}

/// Full display state for `snapshot`
pub fn compute_display(
    capability: &dyn UnitCapability,
    snapshot: &DeviceSnapshot,
    enabled: bool,
) -> DisplayState {
    let active = enabled && capability.is_active(snapshot);
    let presentation = capability.activity_rule().presentation(active);
    let mut display = DisplayState::base(snapshot, presentation, active);
    capability.render_snapshot(&mut display, snapshot);
    if !enabled {
        display.enabled = false;
        display.tint = Tint::Disabled;
    }
    display
}

pub fn capability_for(kind: UnitKind) -> &'static dyn UnitCapability {
    match kind {
        UnitKind::PowerConsumptionSensor => &PowerConsumptionCapability,
        UnitKind::PowerSwitch => &PowerSwitchCapability,
        UnitKind::MotionDetector => &MotionCapability,
        UnitKind::TemperatureSensor => &TemperatureCapability,
    }
}

const fn presentation(icon: UnitIcon, tint: Tint, tooltip_key: &'static str) -> Presentation {
    Presentation {
        icon,
        tint,
        tooltip_key,
    }
}

static POWER_RULE: ActivityRule = ActivityRule::new(
    presentation(UnitIcon::Power, Tint::Active, "powerOn"),
    presentation(UnitIcon::PowerOff, Tint::Idle, "powerOff"),
);

static SWITCH_RULE: ActivityRule = ActivityRule::new(
    presentation(UnitIcon::SwitchOn, Tint::Active, "switchOn"),
    presentation(UnitIcon::SwitchOff, Tint::Idle, "switchOff"),
);

static MOTION_RULE: ActivityRule = ActivityRule::new(
    presentation(UnitIcon::Motion, Tint::Active, "motionDetected"),
    presentation(UnitIcon::NoMotion, Tint::Idle, "noMotion"),
);

static HEATING_RULE: ActivityRule = ActivityRule::new(
    presentation(UnitIcon::Heating, Tint::Active, "heating"),
    presentation(UnitIcon::Thermometer, Tint::Idle, "notHeating"),
);

fn on_off(on: bool) -> DisplayText {
    DisplayText::Localized(if on { "on" } else { "off" })
}

struct PowerConsumptionCapability;

impl UnitCapability for PowerConsumptionCapability {
    fn kind(&self) -> UnitKind {
        UnitKind::PowerConsumptionSensor
    }

    fn activity_rule(&self) -> &'static ActivityRule {
        &POWER_RULE
    }

    fn is_active(&self, snapshot: &DeviceSnapshot) -> bool {
        snapshot.power_consumption().is_some_and(|s| s.current != 0.0)
    }

    fn render_snapshot(&self, display: &mut DisplayState, snapshot: &DeviceSnapshot) {
        let Some(state) = snapshot.power_consumption() else {
            return;
        };
        display.headline = format!("{:.1} W", state.current).into();
        display.details = vec![
            DetailRow::new("powerConsumption", format!("{:.2} kWh", state.consumption)),
            DetailRow::new("currentVoltage", format!("{:.1} V", state.voltage)),
        ];
    }
}

struct PowerSwitchCapability;

impl UnitCapability for PowerSwitchCapability {
    fn kind(&self) -> UnitKind {
        UnitKind::PowerSwitch
    }

    fn activity_rule(&self) -> &'static ActivityRule {
        &SWITCH_RULE
    }

    fn is_active(&self, snapshot: &DeviceSnapshot) -> bool {
        matches!(snapshot.state, UnitState::PowerSwitch(s) if s.on)
    }

    fn render_snapshot(&self, display: &mut DisplayState, snapshot: &DeviceSnapshot) {
        if let UnitState::PowerSwitch(s) = snapshot.state {
            display.headline = on_off(s.on);
            display.details = vec![DetailRow::new("powerState", on_off(s.on))];
        }
    }
}

struct MotionCapability;

impl UnitCapability for MotionCapability {
    fn kind(&self) -> UnitKind {
        UnitKind::MotionDetector
    }

    fn activity_rule(&self) -> &'static ActivityRule {
        &MOTION_RULE
    }

    fn is_active(&self, snapshot: &DeviceSnapshot) -> bool {
        matches!(snapshot.state, UnitState::Motion(s) if s.detected)
    }

    fn render_snapshot(&self, display: &mut DisplayState, snapshot: &DeviceSnapshot) {
        if let UnitState::Motion(s) = snapshot.state {
            let text = DisplayText::Localized(if s.detected {
                "motionDetected"
            } else {
                "noMotion"
            });
            display.headline = text.clone();
            display.details = vec![
                DetailRow::new("motionState", text),
                DetailRow::new(
                    "lastChange",
                    snapshot.timestamp.format("%H:%M:%S").to_string(),
                ),
            ];
        }
    }
}

struct TemperatureCapability;

impl UnitCapability for TemperatureCapability {
    fn kind(&self) -> UnitKind {
        UnitKind::TemperatureSensor
    }

    fn activity_rule(&self) -> &'static ActivityRule {
        &HEATING_RULE
    }

    fn is_active(&self, snapshot: &DeviceSnapshot) -> bool {
        matches!(snapshot.state, UnitState::Temperature(s) if s.celsius < s.target_celsius)
    }

    fn render_snapshot(&self, display: &mut DisplayState, snapshot: &DeviceSnapshot) {
        if let UnitState::Temperature(s) = snapshot.state {
            display.headline = format!("{:.1} °C", s.celsius).into();
            display.details = vec![
                DetailRow::new("temperature", format!("{:.1} °C", s.celsius)),
                DetailRow::new("targetTemperature", format!("{:.1} °C", s.target_celsius)),
            ];
        }
    }
}
