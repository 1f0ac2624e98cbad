//! Builders shared by tests across the workspace

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use bcozy_core::{
    DeviceSnapshot, MotionState, PowerConsumptionState, PowerSwitchState, UnitKind, UnitState,
};

use crate::sim::{SimulatedMiddleware, SimulatedUnit, SimulationOptions, UnitSpec};

/// Power consumption snapshot drawing `current` watts
pub fn power_snapshot(id: &str, label: &str, current: f64) -> DeviceSnapshot {
    DeviceSnapshot::new(
        id,
        label,
        UnitState::PowerConsumption(PowerConsumptionState {
            current,
            consumption: 12.5,
            voltage: 230.0,
        }),
    )
}

pub fn switch_snapshot(id: &str, label: &str, on: bool) -> DeviceSnapshot {
    DeviceSnapshot::new(id, label, UnitState::PowerSwitch(PowerSwitchState { on }))
}

pub fn motion_snapshot(id: &str, label: &str, detected: bool) -> DeviceSnapshot {
    DeviceSnapshot::new(id, label, UnitState::Motion(MotionState { detected }))
}

/// Simulated power consumption sensor holding `current` watts
pub fn power_unit(id: &str, current: f64) -> Arc<SimulatedUnit> {
    Arc::new(SimulatedUnit::new(
        power_snapshot(id, "Test Outlet", current).with_location("Lab"),
    ))
}

/// Options for a quiet simulation: no drivers, no latency, no groups
pub fn quiet_options() -> SimulationOptions {
    SimulationOptions {
        update_interval: Duration::from_millis(10),
        drive: false,
        group_latency: Duration::ZERO,
        initial_groups: Vec::new(),
        ..Default::default()
    }
}

/// Start a quiet simulation with one unit per kind
pub fn quiet_middleware(shutdown_rx: watch::Receiver<bool>) -> SimulatedMiddleware {
    let specs: Vec<UnitSpec> = UnitKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| UnitSpec::new(&format!("unit-{i}"), &format!("Unit {i}"), "Lab", *kind))
        .collect();
    SimulatedMiddleware::start(&specs, quiet_options(), shutdown_rx)
}
