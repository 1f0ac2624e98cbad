//! In-memory authorization group registry

use std::collections::HashSet;
use std::time::Duration;

use bcozy_core::prelude::*;
use bcozy_core::GroupRecord;

use crate::groups::AuthorizationGroupBackend;

/// Group registry kept in memory, in insertion order.
///
/// `latency` delays every mutation to mimic a round trip to the middleware.
#[derive(Debug, Default)]
pub struct InMemoryGroupBackend {
    groups: Vec<GroupRecord>,
    next_id: u64,
    latency: Duration,
    /// Labels whose registration the middleware refuses
    refused: HashSet<String>,
}

impl InMemoryGroupBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_groups<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut backend = Self::new();
        for label in labels {
            backend.insert(label.into());
        }
        backend
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make the registry refuse `label` with a remote error
    pub fn refuse(mut self, label: impl Into<String>) -> Self {
        self.refused.insert(label.into());
        self
    }

    fn insert(&mut self, label: String) -> GroupRecord {
        self.next_id += 1;
        let record = GroupRecord::new(format!("group-{}", self.next_id), label);
        self.groups.push(record.clone());
        record
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl AuthorizationGroupBackend for InMemoryGroupBackend {
    async fn add_group(&mut self, label: &str) -> Result<GroupRecord> {
        self.round_trip().await;

        if self.refused.contains(label) {
            return Err(Error::could_not(
                "add group",
                Error::remote(format!("registry refused group {label}")),
            ));
        }
        if self.groups.iter().any(|g| g.label == label) {
            return Err(Error::could_not(
                "add group",
                Error::validation(format!("Group {label} already exists")),
            ));
        }

        let record = self.insert(label.to_string());
        info!("Registered authorization group {} ({})", record.label, record.id);
        Ok(record)
    }

    async fn remove_group(&mut self, group: &GroupRecord) -> Result<()> {
        self.round_trip().await;

        let before = self.groups.len();
        self.groups.retain(|g| g.id != group.id);
        if self.groups.len() == before {
            return Err(Error::could_not(
                "remove group",
                Error::remote(format!("no group with id {}", group.id)),
            ));
        }
        info!("Removed authorization group {} ({})", group.label, group.id);
        Ok(())
    }

    fn list(&self) -> Vec<GroupRecord> {
        self.groups.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcozy_core::cause_message;

    #[tokio::test]
    async fn test_duplicate_label_rejected() {
        let mut backend = InMemoryGroupBackend::with_groups(["Admins"]);
        let err = backend.add_group("Admins").await.unwrap_err();
        assert_eq!(err.to_string(), "Could not add group");
        assert_eq!(cause_message(&err), "Group Admins already exists");
        assert_eq!(backend.list().len(), 1);
    }

    #[tokio::test]
    async fn test_insertion_order_kept() {
        let mut backend = InMemoryGroupBackend::new();
        backend.add_group("B").await.unwrap();
        backend.add_group("A").await.unwrap();
        let labels: Vec<_> = backend.list().into_iter().map(|g| g.label).collect();
        assert_eq!(labels, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_remove_unknown_group_fails() {
        let mut backend = InMemoryGroupBackend::new();
        let ghost = GroupRecord::new("group-99", "Ghost");
        assert!(backend.remove_group(&ghost).await.is_err());
    }

    #[tokio::test]
    async fn test_refused_label() {
        let mut backend = InMemoryGroupBackend::new().refuse("Root");
        let err = backend.add_group("Root").await.unwrap_err();
        assert_eq!(cause_message(&err), "registry refused group Root");
    }
}
