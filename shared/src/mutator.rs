//! Back-references from decoded entities to the client that produced them
//!
//! A list response is decoded into fresh entity values, and each one is handed
//! a [`ClientHandle`] before it reaches the caller. The handle only issues
//! follow-up calls; the client never holds on to the entities it returns.

use crate::entity::Grid;
use crate::error::{RemoteError, Result};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// The follow-up operations an entity may issue against its originating client.
#[async_trait]
pub trait ResourceMutator: Send + Sync {
    async fn fetch_grids(&self) -> Result<Vec<Grid>>;
    async fn delete_grid(&self, entity_id: i64) -> Result<()>;
    async fn stop_grid(&self, entity_id: i64) -> Result<()>;
    async fn power_up_grid(&self, entity_id: i64) -> Result<()>;
    async fn power_down_grid(&self, entity_id: i64) -> Result<()>;
    async fn stop_character(&self, entity_id: i64) -> Result<()>;
    async fn delete_asteroid(&self, entity_id: i64) -> Result<()>;
    async fn delete_planet(&self, entity_id: i64) -> Result<()>;
    async fn stop_floating_object(&self, entity_id: i64) -> Result<()>;
    async fn delete_floating_object(&self, entity_id: i64) -> Result<()>;
    async fn kick_player(&self, steam_id: i64) -> Result<()>;
    async fn ban_player(&self, steam_id: i64) -> Result<()>;
    async fn promote_player(&self, steam_id: i64) -> Result<()>;
    async fn demote_player(&self, steam_id: i64) -> Result<()>;
}

/// Non-serialized handle an entity keeps to its originating client.
#[derive(Clone, Default)]
pub struct ClientHandle(Option<Arc<dyn ResourceMutator>>);

impl ClientHandle {
    pub fn new(mutator: Arc<dyn ResourceMutator>) -> Self {
        Self(Some(mutator))
    }

    pub fn is_attached(&self) -> bool {
        self.0.is_some()
    }

    /// The attached client, or [`RemoteError::Detached`].
    pub fn get(&self) -> Result<&dyn ResourceMutator> {
        self.0.as_deref().ok_or(RemoteError::Detached)
    }
}

impl fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_attached() { "attached" } else { "detached" };
        write!(f, "ClientHandle({})", state)
    }
}

/// Wires a back-reference into freshly decoded data.
pub trait Attach {
    fn attach(&mut self, mutator: &Arc<dyn ResourceMutator>);
}

impl<T: Attach> Attach for Vec<T> {
    fn attach(&mut self, mutator: &Arc<dyn ResourceMutator>) {
        for item in self.iter_mut() {
            item.attach(mutator);
        }
    }
}
