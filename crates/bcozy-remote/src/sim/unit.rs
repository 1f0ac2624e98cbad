//! In-process unit proxy with push delivery

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use bcozy_core::prelude::*;
use bcozy_core::{DeviceSnapshot, UnitId, UnitKind, UnitState};

use crate::unit::{Observer, ObserverId, UnitRemote};

#[derive(Default)]
struct Inner {
    snapshot: Option<DeviceSnapshot>,
    observers: Vec<(ObserverId, Observer)>,
    unreachable: bool,
    disposed: bool,
}

/// Simulated unit proxy.
///
/// Observers are called from whichever thread calls [`SimulatedUnit::publish`],
/// which mirrors the middleware's own delivery threads.
pub struct SimulatedUnit {
    unit_id: UnitId,
    kind: UnitKind,
    inner: Mutex<Inner>,
    next_observer: AtomicU64,
}

impl std::fmt::Debug for SimulatedUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedUnit")
            .field("unit_id", &self.unit_id)
            .field("kind", &self.kind)
            .field("observers", &self.observer_count())
            .finish()
    }
}

impl SimulatedUnit {
    pub fn new(snapshot: DeviceSnapshot) -> Self {
        Self {
            unit_id: snapshot.unit_id.clone(),
            kind: snapshot.kind(),
            inner: Mutex::new(Inner {
                snapshot: Some(snapshot),
                ..Default::default()
            }),
            next_observer: AtomicU64::new(1),
        }
    }

    /// A unit whose data has not been synchronized yet: fetches fail until
    /// the first [`SimulatedUnit::publish`].
    pub fn without_data(unit_id: impl Into<UnitId>, kind: UnitKind) -> Self {
        Self {
            unit_id: unit_id.into(),
            kind,
            inner: Mutex::new(Inner::default()),
            next_observer: AtomicU64::new(1),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Store a new state and push the resulting snapshot to every observer.
    ///
    /// Observers run on the calling thread, outside the internal lock.
    pub fn publish(&self, snapshot: DeviceSnapshot) {
        let observers: Vec<Observer> = {
            let mut inner = self.lock();
            if inner.disposed {
                trace!("Dropping publish on disposed unit {}", self.unit_id);
                return;
            }
            inner.snapshot = Some(snapshot.clone());
            inner.observers.iter().map(|(_, o)| o.clone()).collect()
        };
        for observer in observers {
            observer(snapshot.clone());
        }
    }

    /// Publish a new kind-specific state, keeping label and location.
    pub fn publish_state(&self, state: UnitState) {
        let snapshot = {
            let inner = self.lock();
            match &inner.snapshot {
                Some(current) => current.clone().with_state(state),
                None => DeviceSnapshot::new(self.unit_id.clone(), self.unit_id.as_str(), state),
            }
        };
        self.publish(snapshot);
    }

    /// Last published snapshot, if any
    pub fn current(&self) -> Option<DeviceSnapshot> {
        self.lock().snapshot.clone()
    }

    /// Make fetches and new subscriptions fail as if the network were down.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.lock().unreachable = unreachable;
    }

    /// Shut the proxy down; observers are dropped and nothing is delivered anymore.
    pub fn dispose(&self) {
        let mut inner = self.lock();
        inner.disposed = true;
        inner.observers.clear();
    }

    pub fn observer_count(&self) -> usize {
        self.lock().observers.len()
    }
}

impl UnitRemote for SimulatedUnit {
    fn unit_id(&self) -> &UnitId {
        &self.unit_id
    }

    fn kind(&self) -> UnitKind {
        self.kind
    }

    fn fetch_current_snapshot(&self) -> Result<DeviceSnapshot> {
        let inner = self.lock();
        if inner.disposed {
            return Err(Error::fetch(&self.unit_id, "remote disposed"));
        }
        if inner.unreachable {
            return Err(Error::fetch(&self.unit_id, "unit not reachable"));
        }
        inner
            .snapshot
            .clone()
            .ok_or_else(|| Error::fetch(&self.unit_id, "data not synchronized yet"))
    }

    fn add_observer(&self, observer: Observer) -> Result<ObserverId> {
        let mut inner = self.lock();
        if inner.disposed {
            return Err(Error::subscription(&self.unit_id, "remote disposed"));
        }
        if inner.unreachable {
            return Err(Error::subscription(&self.unit_id, "unit not reachable"));
        }
        let id = ObserverId(self.next_observer.fetch_add(1, Ordering::Relaxed));
        inner.observers.push((id, observer));
        debug!("Added {} to unit {}", id, self.unit_id);
        Ok(id)
    }

    fn remove_observer(&self, id: ObserverId) {
        let mut inner = self.lock();
        let before = inner.observers.len();
        inner.observers.retain(|(oid, _)| *oid != id);
        if inner.observers.len() != before {
            debug!("Removed {} from unit {}", id, self.unit_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcozy_core::{PowerSwitchState, UnitState};
    use std::sync::Arc;

    fn switch(on: bool) -> DeviceSnapshot {
        DeviceSnapshot::new(
            "switch-1",
            "Desk Lamp",
            UnitState::PowerSwitch(PowerSwitchState { on }),
        )
    }

    #[test]
    fn test_fetch_returns_published_snapshot() {
        let unit = SimulatedUnit::new(switch(false));
        unit.publish(switch(true));
        let fetched = unit.fetch_current_snapshot().unwrap();
        assert_eq!(fetched.state, UnitState::PowerSwitch(PowerSwitchState { on: true }));
    }

    #[test]
    fn test_fetch_without_data_fails() {
        let unit = SimulatedUnit::without_data("pcs-1", UnitKind::PowerConsumptionSensor);
        assert!(matches!(
            unit.fetch_current_snapshot(),
            Err(Error::Fetch { .. })
        ));
    }

    #[test]
    fn test_unreachable_rejects_observers() {
        let unit = SimulatedUnit::new(switch(false));
        unit.set_unreachable(true);
        let result = unit.add_observer(Arc::new(|_| {}));
        assert!(matches!(result, Err(Error::Subscription { .. })));
    }

    #[test]
    fn test_publish_reaches_observers_until_removed() {
        let unit = SimulatedUnit::new(switch(false));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let id = unit
            .add_observer(Arc::new(move |s: DeviceSnapshot| {
                sink.lock().unwrap().push(s.state)
            }))
            .unwrap();

        unit.publish(switch(true));
        unit.remove_observer(id);
        unit.publish(switch(false));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![UnitState::PowerSwitch(PowerSwitchState { on: true })]
        );
        assert_eq!(unit.observer_count(), 0);
    }

    #[test]
    fn test_dispose_drops_observers() {
        let unit = SimulatedUnit::new(switch(false));
        unit.add_observer(Arc::new(|_| {})).unwrap();
        unit.dispose();
        assert_eq!(unit.observer_count(), 0);
        assert!(unit.add_observer(Arc::new(|_| {})).is_err());
    }
}
