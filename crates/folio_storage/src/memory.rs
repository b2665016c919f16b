//! In-memory World store.

use crate::validate_world_name;
use folio_core::World;
use folio_error::{FolioResult, StorageError, StorageErrorKind};
use folio_interface::WorldStore;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// World store backed by a map, with the same semantics as the filesystem store.
#[derive(Debug, Default)]
pub struct InMemoryWorldStore {
    worlds: RwLock<BTreeMap<String, World>>,
}

impl InMemoryWorldStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl WorldStore for InMemoryWorldStore {
    async fn save(&self, name: &str, world: &World) -> FolioResult<()> {
        validate_world_name(name)?;
        self.worlds
            .write()
            .await
            .insert(name.to_string(), world.clone());
        Ok(())
    }

    async fn load(&self, name: &str) -> FolioResult<World> {
        validate_world_name(name)?;
        self.worlds
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::new(StorageErrorKind::WorldNotFound(name.to_string())).into())
    }

    async fn exists(&self, name: &str) -> FolioResult<bool> {
        validate_world_name(name)?;
        Ok(self.worlds.read().await.contains_key(name))
    }

    async fn list(&self) -> FolioResult<Vec<String>> {
        Ok(self.worlds.read().await.keys().cloned().collect())
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}
