//! Client-side proxy of one middleware unit

use std::fmt;
use std::sync::Arc;

use bcozy_core::prelude::*;
use bcozy_core::{DeviceSnapshot, UnitId, UnitKind};

/// Callback the middleware invokes for each pushed snapshot.
///
/// Invoked on a middleware delivery thread, never on the UI thread.
pub type Observer = Arc<dyn Fn(DeviceSnapshot) + Send + Sync>;

/// Token returned by [`UnitRemote::add_observer`], used to remove the observer again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer-{}", self.0)
    }
}

/// Remote proxy of a unit managed by the middleware
pub trait UnitRemote: Send + Sync {
    fn unit_id(&self) -> &UnitId;

    fn kind(&self) -> UnitKind;

    /// Fetch the unit's current data, blocking until the proxy answers or
    /// its own timeout policy gives up.
    fn fetch_current_snapshot(&self) -> Result<DeviceSnapshot>;

    /// Register an observer for pushed snapshots.
    ///
    /// Fails with [`Error::Subscription`] if the proxy is disposed or the
    /// unit is unreachable.
    fn add_observer(&self, observer: Observer) -> Result<ObserverId>;

    /// Remove an observer. Unknown ids are ignored.
    fn remove_observer(&self, id: ObserverId);
}

impl fmt::Debug for dyn UnitRemote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitRemote")
            .field("unit_id", self.unit_id())
            .field("kind", &self.kind())
            .finish()
    }
}
