//! Remote observation binding
//!
//! Connects UI-thread callbacks to the push notifications of [`UnitRemote`]s.
//!
//! Notifications arrive on middleware threads and are parked in a shared
//! [`MarshalQueue`]. The UI loop calls [`RemoteObservationBinding::drain`]
//! once per iteration, which hands every parked snapshot to the callback of
//! its subscription, on the UI thread, together with a mutable UI context.
//!
//! Snapshots that pile up for one subscription between two drains are
//! coalesced: only the newest one is delivered, in the queue position of the
//! first.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use bcozy_core::prelude::*;
use bcozy_core::{DeviceSnapshot, UnitId};
use bcozy_remote::{Observer, ObserverId, UnitRemote};

/// Identifies one subscription within a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscription-{}", self.0)
    }
}

#[derive(Debug, Default)]
struct QueueState {
    active: HashSet<SubscriptionId>,
    order: VecDeque<SubscriptionId>,
    pending: HashMap<SubscriptionId, DeviceSnapshot>,
    coalesced: u64,
    dropped: u64,
}

/// Thread-safe hand-over point between notification threads and the UI thread
#[derive(Debug, Default)]
pub struct MarshalQueue {
    state: Mutex<QueueState>,
}

impl MarshalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn activate(&self, id: SubscriptionId) {
        self.lock().active.insert(id);
    }

    /// Park `snapshot` for delivery. Callable from any thread.
    ///
    /// Returns false if the subscription is no longer active, in which case
    /// the snapshot is dropped.
    pub fn push(&self, id: SubscriptionId, snapshot: DeviceSnapshot) -> bool {
        let mut state = self.lock();
        if !state.active.contains(&id) {
            state.dropped += 1;
            return false;
        }
        if state.pending.insert(id, snapshot).is_some() {
            state.coalesced += 1;
        } else {
            state.order.push_back(id);
        }
        true
    }

    /// Remove every parked snapshot, in first-received order
    pub fn take_all(&self) -> Vec<(SubscriptionId, DeviceSnapshot)> {
        let mut state = self.lock();
        let order = std::mem::take(&mut state.order);
        order
            .into_iter()
            .filter_map(|id| state.pending.remove(&id).map(|s| (id, s)))
            .collect()
    }

    /// Deactivate `id` and drop its parked snapshot.
    ///
    /// Returns the number of snapshots discarded.
    pub fn discard(&self, id: SubscriptionId) -> usize {
        let mut state = self.lock();
        state.active.remove(&id);
        if state.pending.remove(&id).is_some() {
            state.order.retain(|queued| *queued != id);
            1
        } else {
            0
        }
    }

    pub fn is_active(&self, id: SubscriptionId) -> bool {
        self.lock().active.contains(&id)
    }

    /// Number of snapshots waiting for the next drain
    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return and reset the coalesced and dropped counters
    fn take_counters(&self) -> (u64, u64) {
        let mut state = self.lock();
        let counters = (state.coalesced, state.dropped);
        state.coalesced = 0;
        state.dropped = 0;
        counters
    }
}

/// One widget's registration with one remote unit.
///
/// Owned by the widget that created it and released through
/// [`RemoteObservationBinding::unsubscribe`]. Dropping an active
/// subscription releases it as well, with a warning.
pub struct ObservationSubscription {
    id: SubscriptionId,
    remote: Arc<dyn UnitRemote>,
    observer: ObserverId,
    queue: Arc<MarshalQueue>,
    active: bool,
}

impl fmt::Debug for ObservationSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservationSubscription")
            .field("id", &self.id)
            .field("unit", self.remote.unit_id())
            .field("observer", &self.observer)
            .field("active", &self.active)
            .finish()
    }
}

impl ObservationSubscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn unit_id(&self) -> &UnitId {
        self.remote.unit_id()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns false if the subscription was already released
    fn release(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        let discarded = self.queue.discard(self.id);
        self.remote.remove_observer(self.observer);
        if discarded > 0 {
            trace!("Discarded {} pending snapshot(s) of {}", discarded, self.id);
        }
        true
    }
}

impl Drop for ObservationSubscription {
    fn drop(&mut self) {
        if self.active {
            warn!(
                "{} for unit {} dropped without unsubscribe",
                self.id,
                self.remote.unit_id()
            );
            self.release();
        }
    }
}

type UpdateCallback<C> = Box<dyn FnMut(&mut C, DeviceSnapshot) + Send>;

/// Registry of UI-thread callbacks fed by remote notifications.
///
/// `C` is the UI state handed to every callback during [`Self::drain`].
pub struct RemoteObservationBinding<C> {
    queue: Arc<MarshalQueue>,
    callbacks: HashMap<SubscriptionId, UpdateCallback<C>>,
    next_id: u64,
}

impl<C> fmt::Debug for RemoteObservationBinding<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteObservationBinding")
            .field("subscriptions", &self.callbacks.len())
            .field("pending", &self.queue.len())
            .finish()
    }
}

impl<C> Default for RemoteObservationBinding<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> RemoteObservationBinding<C> {
    pub fn new() -> Self {
        Self::with_queue(Arc::new(MarshalQueue::new()))
    }

    /// Build a binding around an existing queue
    pub fn with_queue(queue: Arc<MarshalQueue>) -> Self {
        Self {
            queue,
            callbacks: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn queue(&self) -> &Arc<MarshalQueue> {
        &self.queue
    }

    /// Register `on_update` for every snapshot `remote` pushes from now on.
    ///
    /// `on_update` only ever runs inside [`Self::drain`], never during this
    /// call. Fails with [`Error::Subscription`] if the remote refuses the
    /// observer.
    pub fn subscribe<F>(
        &mut self,
        remote: &Arc<dyn UnitRemote>,
        on_update: F,
    ) -> Result<ObservationSubscription>
    where
        F: FnMut(&mut C, DeviceSnapshot) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        self.queue.activate(id);
        let queue = Arc::clone(&self.queue);
        let observer: Observer = Arc::new(move |snapshot| {
            queue.push(id, snapshot);
        });

        let observer_id = match remote.add_observer(observer) {
            Ok(observer_id) => observer_id,
            Err(e) => {
                self.queue.discard(id);
                return Err(e);
            }
        };

        self.callbacks.insert(id, Box::new(on_update));
        debug!("{} bound to unit {}", id, remote.unit_id());

        Ok(ObservationSubscription {
            id,
            remote: Arc::clone(remote),
            observer: observer_id,
            queue: Arc::clone(&self.queue),
            active: true,
        })
    }

    /// Release `subscription`. Calling this again is a no-op.
    ///
    /// After return the subscription's callback is gone and none of its
    /// pending snapshots will be delivered.
    pub fn unsubscribe(&mut self, subscription: &mut ObservationSubscription) {
        let released = subscription.release();
        let had_callback = self.callbacks.remove(&subscription.id).is_some();
        if released || had_callback {
            debug!(
                "{} released from unit {}",
                subscription.id,
                subscription.unit_id()
            );
        }
    }

    /// Deliver every pending snapshot to its callback. UI thread only.
    ///
    /// Returns the number of callbacks invoked.
    pub fn drain(&mut self, ctx: &mut C) -> usize {
        let batch = self.queue.take_all();
        let mut delivered = 0;

        for (id, snapshot) in batch {
            let Some(callback) = self.callbacks.get_mut(&id) else {
                trace!("No callback for {}, dropping snapshot", id);
                continue;
            };
            callback(ctx, snapshot);
            delivered += 1;
        }

        // Subscriptions dropped without unsubscribe leave their callback behind
        let queue = &self.queue;
        self.callbacks.retain(|id, _| queue.is_active(*id));

        let (coalesced, dropped) = self.queue.take_counters();
        if coalesced > 0 || dropped > 0 {
            trace!(
                "Drained {} snapshot(s), {} coalesced, {} dropped",
                delivered,
                coalesced,
                dropped
            );
        }
        delivered
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
