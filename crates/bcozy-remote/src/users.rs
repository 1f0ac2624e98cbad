//! User registry access used by the login panel

use bcozy_core::prelude::*;

/// Credential check against the middleware's user registry
pub trait UserRegistry: Send + Sync {
    /// Returns `Ok(false)` for wrong credentials and `Err` only when the
    /// registry could not be asked.
    fn authenticate(&self, user: &str, password: &str) -> Result<bool>;
}
