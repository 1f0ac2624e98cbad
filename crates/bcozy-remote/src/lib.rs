//! # bcozy-remote - Middleware Access
//!
//! Client-side view of the BCO middleware: unit proxies with push
//! observation, the authorization group registry and the user registry.
//!
//! ## Public API
//!
//! - [`UnitRemote`] - Proxy of one unit (fetch + observer registration)
//! - [`GroupRegistryClient`] - Async handle to the group registry
//! - [`UserRegistry`] - Credential check for the login panel
//! - [`Middleware`] - Bundle of all of the above, as handed to the app
//! - [`sim`] - In-process simulated middleware
//!
//! Observers registered on a [`UnitRemote`] are invoked on middleware
//! threads. Consumers must marshal data onto their own thread before
//! touching UI state.

pub mod groups;
pub mod sim;
pub mod unit;
pub mod users;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

use std::sync::Arc;

pub use groups::{
    serve_groups, AuthorizationGroupBackend, GroupCommand, GroupRegistryClient,
    LocalAuthorizationGroupBackend,
};
pub use unit::{Observer, ObserverId, UnitRemote};
pub use users::UserRegistry;

/// Connection to a middleware instance
#[derive(Clone)]
pub struct Middleware {
    /// Every unit the client presents, in registry order
    pub units: Vec<Arc<dyn UnitRemote>>,
    pub groups: GroupRegistryClient,
    pub users: Arc<dyn UserRegistry>,
}

impl std::fmt::Debug for Middleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Middleware")
            .field("units", &self.units.len())
            .finish_non_exhaustive()
    }
}
