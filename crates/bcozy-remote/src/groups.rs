//! Authorization group registry access
//!
//! The UI talks to the registry through a [`GroupRegistryClient`]: a cheap,
//! cloneable handle that sends [`GroupCommand`]s to a serving task and awaits
//! the reply. The serving task owns the backend and republishes the ordered
//! group list on a `watch` channel after every change, so the UI never shares
//! a mutable list with the middleware.

use tokio::sync::{mpsc, oneshot, watch};

use bcozy_core::prelude::*;
use bcozy_core::GroupRecord;

/// Middleware side of the authorization group registry
#[trait_variant::make(AuthorizationGroupBackend: Send)]
pub trait LocalAuthorizationGroupBackend {
    /// Register a new group, returning the stored record
    async fn add_group(&mut self, label: &str) -> Result<GroupRecord>;

    /// Remove an existing group
    async fn remove_group(&mut self, group: &GroupRecord) -> Result<()>;

    /// Current groups in display order
    fn list(&self) -> Vec<GroupRecord>;
}

/// Requests understood by the serving task
#[derive(Debug)]
pub enum GroupCommand {
    Add {
        label: String,
        reply: oneshot::Sender<Result<GroupRecord>>,
    },
    Remove {
        group: GroupRecord,
        reply: oneshot::Sender<Result<()>>,
    },
}

/// Handle for issuing group operations from the UI side
#[derive(Debug, Clone)]
pub struct GroupRegistryClient {
    cmd_tx: mpsc::Sender<GroupCommand>,
    groups_rx: watch::Receiver<Vec<GroupRecord>>,
}

impl GroupRegistryClient {
    /// Add a group. Resolves once the middleware answered.
    pub async fn add_group(&self, label: &str) -> Result<GroupRecord> {
        let (reply, rx) = oneshot::channel();
        self.cmd_tx
            .send(GroupCommand::Add {
                label: label.to_string(),
                reply,
            })
            .await
            .map_err(|_| Error::ChannelClosed)?;
        rx.await.map_err(|_| Error::ChannelClosed)?
    }

    /// Remove a group. Resolves once the middleware answered.
    pub async fn remove_group(&self, group: &GroupRecord) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.cmd_tx
            .send(GroupCommand::Remove {
                group: group.clone(),
                reply,
            })
            .await
            .map_err(|_| Error::ChannelClosed)?;
        rx.await.map_err(|_| Error::ChannelClosed)?
    }

    /// Live, ordered view of the registered groups
    pub fn groups(&self) -> watch::Receiver<Vec<GroupRecord>> {
        self.groups_rx.clone()
    }
}

/// Spawn a task serving `backend` and return a client for it.
///
/// The task ends when every client has been dropped.
pub fn serve_groups<B>(mut backend: B) -> GroupRegistryClient
where
    B: AuthorizationGroupBackend + Send + 'static,
{
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<GroupCommand>(32);
    let (groups_tx, groups_rx) = watch::channel(backend.list());

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                GroupCommand::Add { label, reply } => {
                    let result = backend.add_group(&label).await;
                    if result.is_ok() {
                        groups_tx.send_replace(backend.list());
                    }
                    let _ = reply.send(result);
                }
                GroupCommand::Remove { group, reply } => {
                    let result = backend.remove_group(&group).await;
                    if result.is_ok() {
                        groups_tx.send_replace(backend.list());
                    }
                    let _ = reply.send(result);
                }
            }
        }
        debug!("Group registry task finished");
    });

    GroupRegistryClient { cmd_tx, groups_rx }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct VecBackend {
        groups: Vec<GroupRecord>,
    }

    impl AuthorizationGroupBackend for VecBackend {
        async fn add_group(&mut self, label: &str) -> Result<GroupRecord> {
            let record = GroupRecord::new(format!("g{}", self.groups.len()), label);
            self.groups.push(record.clone());
            Ok(record)
        }

        async fn remove_group(&mut self, group: &GroupRecord) -> Result<()> {
            self.groups.retain(|g| g.id != group.id);
            Ok(())
        }

        fn list(&self) -> Vec<GroupRecord> {
            self.groups.clone()
        }
    }

    #[tokio::test]
    async fn test_add_publishes_new_list() {
        let client = serve_groups(VecBackend::default());
        let mut rx = client.groups();
        assert!(rx.borrow_and_update().is_empty());

        let record = client.add_group("Engineers").await.unwrap();

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), vec![record]);
    }

    #[tokio::test]
    async fn test_remove_publishes_new_list() {
        let client = serve_groups(VecBackend::default());
        let record = client.add_group("Guests").await.unwrap();
        client.remove_group(&record).await.unwrap();

        assert!(client.groups().borrow().is_empty());
    }
}
