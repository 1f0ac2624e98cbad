//! Periodic state changes for simulated units

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::watch;

use bcozy_core::prelude::*;
use bcozy_core::{
    MotionState, PowerConsumptionState, PowerSwitchState, TemperatureState, UnitState,
};

use super::unit::SimulatedUnit;
use crate::unit::UnitRemote;

/// Probability that a consuming appliance switches off (or back on) per step
const POWER_TOGGLE_CHANCE: f64 = 0.15;

/// Next state in a plausible random walk from `state`
pub fn next_state<R: Rng>(state: &UnitState, rng: &mut R) -> UnitState {
    match *state {
        UnitState::PowerConsumption(s) => {
            let current = if s.current == 0.0 {
                if rng.gen_bool(POWER_TOGGLE_CHANCE) {
                    rng.gen_range(5.0..120.0)
                } else {
                    0.0
                }
            } else if rng.gen_bool(POWER_TOGGLE_CHANCE) {
                0.0
            } else {
                (s.current + rng.gen_range(-8.0..8.0)).max(0.5)
            };
            let current = (current * 10.0_f64).round() / 10.0;
            // Interval energy in kWh, assuming one step per second
            let consumption = s.consumption + current / 3_600_000.0;
            let voltage = ((230.0 + rng.gen_range(-3.0..3.0)) * 10.0_f64).round() / 10.0;
            UnitState::PowerConsumption(PowerConsumptionState {
                current,
                consumption,
                voltage,
            })
        }
        UnitState::PowerSwitch(s) => UnitState::PowerSwitch(PowerSwitchState {
            on: if rng.gen_bool(0.1) { !s.on } else { s.on },
        }),
        UnitState::Motion(_) => UnitState::Motion(MotionState {
            detected: rng.gen_bool(0.3),
        }),
        UnitState::Temperature(s) => {
            let drift = if s.celsius < s.target_celsius { 0.2 } else { -0.1 };
            let celsius = s.celsius + drift + rng.gen_range(-0.1..0.1);
            UnitState::Temperature(TemperatureState {
                celsius: (celsius * 10.0).round() / 10.0,
                target_celsius: s.target_celsius,
            })
        }
    }
}

/// Spawn a task that publishes a new state for `unit` every `interval`
/// until `shutdown_rx` flips to true.
pub fn spawn_driver(
    unit: Arc<SimulatedUnit>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // First tick completes immediately; the initial state is already published
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let Some(current) = unit.current() else { continue };
                    let state = next_state(&current.state, &mut rand::thread_rng());
                    unit.publish_state(state);
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        debug!("Simulation driver for {} stopping", unit.unit_id());
                        break;
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcozy_core::{DeviceSnapshot, UnitKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_next_state_keeps_kind() {
        let mut rng = StdRng::seed_from_u64(7);
        for kind in UnitKind::ALL {
            let state = kind.default_state();
            assert_eq!(next_state(&state, &mut rng).kind(), kind);
        }
    }

    #[test]
    fn test_power_consumption_never_negative() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = UnitState::PowerConsumption(PowerConsumptionState {
            current: 10.0,
            consumption: 1.0,
            voltage: 230.0,
        });
        for _ in 0..500 {
            state = next_state(&state, &mut rng);
            if let UnitState::PowerConsumption(s) = state {
                assert!(s.current >= 0.0);
                assert!(s.consumption >= 1.0);
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_publishes_and_stops() {
        let unit = Arc::new(SimulatedUnit::new(DeviceSnapshot::new(
            "motion-1",
            "Hallway",
            UnitKind::MotionDetector.default_state(),
        )));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let before = unit.current().unwrap().timestamp;

        let handle = spawn_driver(unit.clone(), Duration::from_millis(100), shutdown_rx);
        tokio::time::sleep(Duration::from_millis(350)).await;
        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();

        assert!(unit.current().unwrap().timestamp >= before);
    }
}
