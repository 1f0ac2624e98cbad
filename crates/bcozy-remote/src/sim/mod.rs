//! Simulated middleware
//!
//! Stands in for a running BCO middleware: a set of [`SimulatedUnit`]s whose
//! state is driven by background tasks, an [`InMemoryGroupBackend`] behind a
//! [`GroupRegistryClient`](crate::GroupRegistryClient) and a
//! [`StaticUserRegistry`].

pub mod driver;
pub mod groups;
pub mod unit;
pub mod users;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use bcozy_core::prelude::*;
use bcozy_core::{DeviceSnapshot, UnitId, UnitKind};

use crate::groups::serve_groups;
use crate::unit::UnitRemote;
use crate::Middleware;

pub use driver::{next_state, spawn_driver};
pub use groups::InMemoryGroupBackend;
pub use unit::SimulatedUnit;
pub use users::StaticUserRegistry;

/// Declaration of one simulated unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub location: Option<String>,
    pub kind: UnitKind,
}

impl UnitSpec {
    pub fn new(id: &str, label: &str, location: &str, kind: UnitKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            location: Some(location.to_string()),
            kind,
        }
    }

    fn initial_snapshot(&self) -> DeviceSnapshot {
        let snapshot = DeviceSnapshot::new(self.id.as_str(), self.label.as_str(), self.kind.default_state());
        match &self.location {
            Some(location) => snapshot.with_location(location.as_str()),
            None => snapshot,
        }
    }
}

/// Demo home used when no units are configured
pub fn default_units() -> Vec<UnitSpec> {
    vec![
        UnitSpec::new("pcs-kitchen-fridge", "Fridge", "Kitchen", UnitKind::PowerConsumptionSensor),
        UnitSpec::new("pcs-living-tv", "Television", "Living Room", UnitKind::PowerConsumptionSensor),
        UnitSpec::new("switch-living-lamp", "Floor Lamp", "Living Room", UnitKind::PowerSwitch),
        UnitSpec::new("motion-hallway", "Hallway Motion", "Hallway", UnitKind::MotionDetector),
        UnitSpec::new("temp-living", "Living Room Climate", "Living Room", UnitKind::TemperatureSensor),
        UnitSpec::new("pcs-office-desk", "Desk Outlet", "Office", UnitKind::PowerConsumptionSensor),
        UnitSpec::new("switch-office-fan", "Fan", "Office", UnitKind::PowerSwitch),
    ]
}

/// How the simulated middleware behaves
#[derive(Debug, Clone)]
pub struct SimulationOptions {
    /// Interval between pushed updates per unit
    pub update_interval: Duration,
    /// Whether background tasks drive unit state at all
    pub drive: bool,
    /// Units whose initial fetch fails because data is not synchronized yet
    pub unsynchronized: HashSet<String>,
    /// Units that refuse fetches and subscriptions
    pub unreachable: HashSet<String>,
    /// Delay applied to every group registry mutation
    pub group_latency: Duration,
    /// Groups present at startup
    pub initial_groups: Vec<String>,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            update_interval: Duration::from_secs(1),
            drive: true,
            unsynchronized: HashSet::new(),
            unreachable: HashSet::new(),
            group_latency: Duration::from_millis(150),
            initial_groups: vec!["Admins".to_string()],
        }
    }
}

/// Running simulation: the [`Middleware`] handle plus direct access to the
/// simulated units for tests and demos.
pub struct SimulatedMiddleware {
    pub middleware: Middleware,
    pub units: Vec<Arc<SimulatedUnit>>,
    drivers: Vec<JoinHandle<()>>,
}

impl SimulatedMiddleware {
    /// Create every unit, start the drivers and the group registry task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        specs: &[UnitSpec],
        options: SimulationOptions,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        let mut units = Vec::with_capacity(specs.len());
        let mut drivers = Vec::new();

        for spec in specs {
            let unit = if options.unsynchronized.contains(&spec.id) {
                SimulatedUnit::without_data(UnitId::new(spec.id.as_str()), spec.kind)
            } else {
                SimulatedUnit::new(spec.initial_snapshot())
            };
            if options.unreachable.contains(&spec.id) {
                unit.set_unreachable(true);
            }
            let unit = Arc::new(unit);

            if options.drive {
                drivers.push(spawn_driver(
                    unit.clone(),
                    options.update_interval,
                    shutdown_rx.clone(),
                ));
            }
            units.push(unit);
        }

        let backend = InMemoryGroupBackend::with_groups(options.initial_groups.iter().cloned())
            .with_latency(options.group_latency);
        let groups = serve_groups(backend);

        info!(
            "Simulated middleware started with {} units ({} driven)",
            units.len(),
            drivers.len()
        );

        let middleware = Middleware {
            units: units
                .iter()
                .map(|u| u.clone() as Arc<dyn UnitRemote>)
                .collect(),
            groups,
            users: Arc::new(StaticUserRegistry::default()),
        };

        Self {
            middleware,
            units,
            drivers,
        }
    }

    /// Look up a simulated unit by id
    pub fn unit(&self, id: &str) -> Option<&Arc<SimulatedUnit>> {
        self.units.iter().find(|u| u.unit_id().as_str() == id)
    }

    /// Wait for every driver task to finish after shutdown was signalled
    pub async fn join(self) {
        for handle in self.drivers {
            if let Err(e) = handle.await {
                warn!("Simulation driver ended abnormally: {}", e);
            }
        }
    }
}
