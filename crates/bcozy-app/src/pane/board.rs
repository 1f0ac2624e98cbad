//! The set of unit panes shown on the units screen

use std::sync::Arc;

use bcozy_core::prelude::*;
use bcozy_core::DeviceSnapshot;
use bcozy_remote::UnitRemote;

use super::{PaneId, UnitPane};
use crate::binding::RemoteObservationBinding;

/// Panes owned by the UI thread, as handed to binding callbacks
#[derive(Debug, Default)]
pub struct Panes {
    items: Vec<UnitPane>,
    changed: Vec<PaneId>,
}

impl Panes {
    fn deliver(&mut self, id: PaneId, snapshot: DeviceSnapshot) {
        let Some(pane) = self.items.iter_mut().find(|p| p.id() == id) else {
            trace!("{} no longer on the board, dropping update", id);
            return;
        };
        if pane.apply_snapshot(snapshot) && !self.changed.contains(&id) {
            self.changed.push(id);
        }
    }
}

/// Panes of one location, in board order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Location label, `None` for units without a location
    pub label: Option<String>,
    pub panes: Vec<PaneId>,
}

/// Owns every unit pane and the binding that feeds them
#[derive(Debug, Default)]
pub struct PaneBoard {
    panes: Panes,
    binding: RemoteObservationBinding<Panes>,
    next_id: u64,
    /// Index into [`PaneBoard::ordered_ids`]
    pub selected: usize,
}

impl PaneBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a pane for `remote` and bind it.
    ///
    /// Fails if the remote refuses the subscription; the pane is then
    /// discarded and never shown.
    pub fn add_unit(&mut self, remote: &Arc<dyn UnitRemote>) -> Result<PaneId> {
        self.next_id += 1;
        let id = PaneId(self.next_id);

        let mut pane = UnitPane::construct(id, remote.as_ref());
        let subscription = self
            .binding
            .subscribe(remote, move |panes: &mut Panes, snapshot| {
                panes.deliver(id, snapshot)
            })?;
        pane.bind(subscription);

        info!("{} shows unit {} ({})", id, pane.unit_id(), pane.kind());
        self.panes.items.push(pane);
        Ok(id)
    }

    /// Dispose the pane and remove it from the board
    pub fn dispose(&mut self, id: PaneId) -> bool {
        let Some(index) = self.panes.items.iter().position(|p| p.id() == id) else {
            return false;
        };
        let mut pane = self.panes.items.remove(index);
        pane.dispose(&mut self.binding);
        self.panes.changed.retain(|changed| *changed != id);
        self.clamp_selection();
        true
    }

    /// Dispose every pane, e.g. on shutdown
    pub fn dispose_all(&mut self) {
        for mut pane in self.panes.items.drain(..) {
            pane.dispose(&mut self.binding);
        }
        self.panes.changed.clear();
        self.selected = 0;
    }

    /// Deliver pushed snapshots to their panes. UI thread only.
    pub fn drain_updates(&mut self) -> usize {
        self.binding.drain(&mut self.panes)
    }

    /// Panes whose display changed since the last call
    pub fn take_changed(&mut self) -> Vec<PaneId> {
        std::mem::take(&mut self.panes.changed)
    }

    pub fn panes(&self) -> &[UnitPane] {
        &self.panes.items
    }

    pub fn get(&self, id: PaneId) -> Option<&UnitPane> {
        self.panes.items.iter().find(|p| p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.panes.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.items.is_empty()
    }

    /// Panes grouped by location, rooms in order of first appearance.
    /// Units without a location come last.
    pub fn rooms(&self) -> Vec<Room> {
        let mut rooms: Vec<Room> = Vec::new();
        let mut unassigned = Vec::new();

        for pane in &self.panes.items {
            match &pane.display().location {
                Some(label) => match rooms.iter_mut().find(|r| r.label.as_ref() == Some(label)) {
                    Some(room) => room.panes.push(pane.id()),
                    None => rooms.push(Room {
                        label: Some(label.clone()),
                        panes: vec![pane.id()],
                    }),
                },
                None => unassigned.push(pane.id()),
            }
        }

        if !unassigned.is_empty() {
            rooms.push(Room {
                label: None,
                panes: unassigned,
            });
        }
        rooms
    }

    /// Pane ids in display order
    pub fn ordered_ids(&self) -> Vec<PaneId> {
        self.rooms().into_iter().flat_map(|r| r.panes).collect()
    }

    pub fn selected_id(&self) -> Option<PaneId> {
        self.ordered_ids().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.len().saturating_sub(1));
    }

    /// Number of live subscriptions held by the board
    pub fn subscription_count(&self) -> usize {
        self.binding.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcozy_core::{UnitKind, UNKNOWN_ID};
    use bcozy_remote::sim::SimulatedUnit;
    use bcozy_remote::test_utils::{power_snapshot, power_unit, switch_snapshot};

    fn remote(unit: &Arc<SimulatedUnit>) -> Arc<dyn UnitRemote> {
        unit.clone()
    }

    #[test]
    fn test_updates_reach_pane_after_drain() {
        let unit = power_unit("pcs-1", 0.0);
        let mut board = PaneBoard::new();
        let id = board.add_unit(&remote(&unit)).unwrap();

        unit.publish(power_snapshot("pcs-1", "Kettle", 1.0));
        unit.publish(power_snapshot("pcs-1", "Kettle", 17.5));
        assert_eq!(board.get(id).unwrap().display().title, "Test Outlet");

        assert_eq!(board.drain_updates(), 1);
        let pane = board.get(id).unwrap();
        assert_eq!(pane.display().title, "Kettle");
        assert!(pane.display().active);
        assert_eq!(pane.update_count(), 1);
        assert_eq!(board.take_changed(), vec![id]);
        assert!(board.take_changed().is_empty());
    }

    #[test]
    fn test_unreachable_unit_never_enters_board() {
        let unit = power_unit("pcs-1", 0.0);
        unit.set_unreachable(true);
        let mut board = PaneBoard::new();

        let result = board.add_unit(&remote(&unit));
        assert!(matches!(result, Err(Error::Subscription { .. })));
        assert!(board.is_empty());
        assert_eq!(board.subscription_count(), 0);
    }

    #[test]
    fn test_unsynchronized_unit_shows_placeholder() {
        let unit = Arc::new(SimulatedUnit::without_data(
            "pcs-1",
            UnitKind::PowerConsumptionSensor,
        ));
        let mut board = PaneBoard::new();
        let id = board.add_unit(&remote(&unit)).unwrap();
        assert_eq!(board.get(id).unwrap().display().title, UNKNOWN_ID);
    }

    #[test]
    fn test_dispose_drops_pending_updates() {
        let unit = power_unit("pcs-1", 0.0);
        let mut board = PaneBoard::new();
        let id = board.add_unit(&remote(&unit)).unwrap();

        unit.publish(power_snapshot("pcs-1", "Kettle", 3.0));
        assert!(board.dispose(id));
        assert!(!board.dispose(id));

        assert_eq!(board.drain_updates(), 0);
        assert_eq!(unit.observer_count(), 0);
        assert!(board.take_changed().is_empty());
    }

    #[test]
    fn test_rooms_in_first_appearance_order() {
        let kitchen = Arc::new(SimulatedUnit::new(
            power_snapshot("a", "Fridge", 1.0).with_location("Kitchen"),
        ));
        let office = Arc::new(SimulatedUnit::new(
            switch_snapshot("b", "Fan", false).with_location("Office"),
        ));
        let nowhere = Arc::new(SimulatedUnit::new(switch_snapshot("c", "Spare", false)));
        let kettle = Arc::new(SimulatedUnit::new(
            power_snapshot("d", "Kettle", 0.0).with_location("Kitchen"),
        ));

        let mut board = PaneBoard::new();
        let ids: Vec<_> = [&kitchen, &nowhere, &office, &kettle]
            .into_iter()
            .map(|u| board.add_unit(&remote(u)).unwrap())
            .collect();

        let rooms = board.rooms();
        let labels: Vec<_> = rooms.iter().map(|r| r.label.as_deref()).collect();
        assert_eq!(labels, vec![Some("Kitchen"), Some("Office"), None]);
        assert_eq!(rooms[0].panes, vec![ids[0], ids[3]]);
        assert_eq!(board.ordered_ids(), vec![ids[0], ids[3], ids[2], ids[1]]);
    }

    #[test]
    fn test_selection_wraps_and_clamps() {
        let mut board = PaneBoard::new();
        let a = board.add_unit(&remote(&power_unit("a", 0.0))).unwrap();
        let b = board.add_unit(&remote(&power_unit("b", 0.0))).unwrap();

        board.select_previous();
        assert_eq!(board.selected_id(), Some(b));
        board.select_next();
        assert_eq!(board.selected_id(), Some(a));

        board.selected = 1;
        board.dispose(b);
        assert_eq!(board.selected_id(), Some(a));
    }
}
