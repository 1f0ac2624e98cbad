//! Fixed credential table

use std::collections::HashMap;

use bcozy_core::prelude::*;

use crate::users::UserRegistry;

/// User registry backed by a fixed table of user names and passwords
#[derive(Debug, Clone)]
pub struct StaticUserRegistry {
    users: HashMap<String, String>,
}

impl Default for StaticUserRegistry {
    /// The middleware's factory account: `Admin` with an empty password
    fn default() -> Self {
        Self::new([("Admin", "")])
    }
}

impl StaticUserRegistry {
    pub fn new<'a>(users: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|(u, p)| (u.to_string(), p.to_string()))
                .collect(),
        }
    }
}

impl UserRegistry for StaticUserRegistry {
    fn authenticate(&self, user: &str, password: &str) -> Result<bool> {
        let accepted = self.users.get(user).is_some_and(|p| p == password);
        debug!("Authentication for {:?}: {}", user, accepted);
        Ok(accepted)
    }
}
