//! Unit panes
//!
//! A [`UnitPane`] presents one remote unit. Its lifecycle:
//!
//! - `Constructing`: the current data is fetched synchronously. A failed
//!   fetch is logged and the pane shows a disabled placeholder instead.
//! - `Bound`: the pane holds an active [`ObservationSubscription`] and every
//!   delivered snapshot replaces its [`DisplayState`].
//! - `Disposed`: the subscription is released. Entered exactly once, final.

pub mod board;
pub mod capability;
pub mod display;

use std::fmt;
use std::sync::Arc;

use bcozy_core::prelude::*;
use bcozy_core::{log_history, DeviceSnapshot, UnitId, UnitKind};
use bcozy_remote::UnitRemote;

use crate::binding::{ObservationSubscription, RemoteObservationBinding};

pub use board::{PaneBoard, Panes, Room};
pub use capability::{capability_for, compute_display, UnitCapability};
pub use display::{
    ActivityRule, DetailRow, DisplayState, DisplayText, Presentation, Tint, UnitIcon,
};

/// Identifies a pane on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaneId(pub u64);

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pane-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneLifecycleState {
    Constructing,
    Bound,
    Disposed,
}

/// Widget state for one remote unit
pub struct UnitPane {
    id: PaneId,
    unit_id: UnitId,
    kind: UnitKind,
    capability: &'static dyn UnitCapability,
    lifecycle: PaneLifecycleState,
    display: DisplayState,
    subscription: Option<ObservationSubscription>,
    updates: u64,
}

impl fmt::Debug for UnitPane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitPane")
            .field("id", &self.id)
            .field("unit_id", &self.unit_id)
            .field("kind", &self.kind)
            .field("lifecycle", &self.lifecycle)
            .field("title", &self.display.title)
            .finish()
    }
}

impl UnitPane {
    /// Fetch the unit's current data and build the pane.
    ///
    /// Never fails: without data the pane renders the placeholder state
    /// (label [`bcozy_core::UNKNOWN_ID`], zeroed values, disabled).
    pub fn construct(id: PaneId, remote: &dyn UnitRemote) -> Self {
        let kind = remote.kind();
        let capability = capability_for(kind);

        let display = match capability.fetch_snapshot(remote) {
            Ok(snapshot) => compute_display(capability, &snapshot, true),
            Err(e) => {
                log_history(
                    &format!("Could not fetch data of unit {}", remote.unit_id()),
                    &e,
                );
                let placeholder = DeviceSnapshot::placeholder(remote.unit_id(), kind);
                compute_display(capability, &placeholder, false)
            }
        };

        Self {
            id,
            unit_id: remote.unit_id().clone(),
            kind,
            capability,
            lifecycle: PaneLifecycleState::Constructing,
            display,
            subscription: None,
            updates: 0,
        }
    }

    /// Attach the pane's subscription, completing construction
    pub fn bind(&mut self, subscription: ObservationSubscription) {
        if self.lifecycle != PaneLifecycleState::Constructing {
            warn!("{} bound twice, keeping the first subscription", self.id);
            return;
        }
        self.subscription = Some(subscription);
        self.lifecycle = PaneLifecycleState::Bound;
    }

    /// Replace the display state with one computed from `snapshot`.
    ///
    /// Returns false if the pane is disposed or the snapshot belongs to
    /// another unit.
    pub fn apply_snapshot(&mut self, snapshot: DeviceSnapshot) -> bool {
        if self.lifecycle == PaneLifecycleState::Disposed {
            trace!("{} is disposed, ignoring update", self.id);
            return false;
        }
        if snapshot.unit_id != self.unit_id {
            debug!(
                "{} ignoring snapshot of unit {} (bound to {})",
                self.id, snapshot.unit_id, self.unit_id
            );
            return false;
        }
        self.display = compute_display(self.capability, &snapshot, true);
        self.updates += 1;
        true
    }

    /// Release the subscription and mark the pane disposed.
    ///
    /// Returns false if the pane was already disposed.
    pub fn dispose<C>(&mut self, binding: &mut RemoteObservationBinding<C>) -> bool {
        if self.lifecycle == PaneLifecycleState::Disposed {
            return false;
        }
        if let Some(mut subscription) = self.subscription.take() {
            binding.unsubscribe(&mut subscription);
        }
        self.lifecycle = PaneLifecycleState::Disposed;
        debug!("{} for unit {} disposed", self.id, self.unit_id);
        true
    }

    pub fn id(&self) -> PaneId {
        self.id
    }

    pub fn unit_id(&self) -> &UnitId {
        &self.unit_id
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn lifecycle(&self) -> PaneLifecycleState {
        self.lifecycle
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle == PaneLifecycleState::Disposed
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Number of pushed snapshots applied since construction
    pub fn update_count(&self) -> u64 {
        self.updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcozy_core::{UnitKind, UNKNOWN_ID};
    use bcozy_remote::sim::SimulatedUnit;
    use bcozy_remote::test_utils::{power_snapshot, power_unit, switch_snapshot};

    #[test]
    fn test_construct_uses_fetched_label() {
        let unit = power_unit("pcs-1", 17.5);
        let pane = UnitPane::construct(PaneId(1), unit.as_ref());
        assert_eq!(pane.display().title, "Test Outlet");
        assert_eq!(pane.display().location.as_deref(), Some("Lab"));
        assert!(pane.display().enabled);
        assert_eq!(pane.lifecycle(), PaneLifecycleState::Constructing);
    }

    #[test]
    fn test_construct_falls_back_to_placeholder() {
        let unit = SimulatedUnit::without_data("pcs-1", UnitKind::PowerConsumptionSensor);
        let pane = UnitPane::construct(PaneId(1), &unit);
        assert_eq!(pane.display().title, UNKNOWN_ID);
        assert!(!pane.display().enabled);
        assert_eq!(pane.display().tint, Tint::Disabled);
        assert_eq!(pane.display().headline, DisplayText::Raw("0.0 W".into()));
    }

    #[test]
    fn test_placeholder_enabled_by_first_update() {
        let unit = SimulatedUnit::without_data("pcs-1", UnitKind::PowerConsumptionSensor);
        let mut pane = UnitPane::construct(PaneId(1), &unit);
        assert!(pane.apply_snapshot(power_snapshot("pcs-1", "Kettle", 2.0)));
        assert!(pane.display().enabled);
        assert_eq!(pane.display().title, "Kettle");
    }

    #[test]
    fn test_snapshot_of_other_unit_ignored() {
        let unit = power_unit("pcs-1", 1.0);
        let mut pane = UnitPane::construct(PaneId(1), unit.as_ref());
        let before = pane.display().clone();
        assert!(!pane.apply_snapshot(switch_snapshot("sw-9", "Lamp", true)));
        assert_eq!(*pane.display(), before);
    }

    #[test]
    fn test_dispose_once() {
        let unit = power_unit("pcs-1", 1.0);
        let remote: Arc<dyn UnitRemote> = unit.clone();
        let mut binding = RemoteObservationBinding::<()>::new();
        let mut pane = UnitPane::construct(PaneId(1), remote.as_ref());
        pane.bind(binding.subscribe(&remote, |_, _| {}).unwrap());
        assert_eq!(unit.observer_count(), 1);

        assert!(pane.dispose(&mut binding));
        assert!(!pane.dispose(&mut binding));
        assert_eq!(unit.observer_count(), 0);
        assert!(!pane.apply_snapshot(power_snapshot("pcs-1", "Kettle", 9.0)));
    }
}
