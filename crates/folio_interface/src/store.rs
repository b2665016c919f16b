//! World persistence trait.

use async_trait::async_trait;
use folio_core::World;
use folio_error::FolioResult;

/// Persistence of World documents by name.
///
/// Writes replace the whole document. Implementations do not lock; callers
/// must ensure a single writer per World.
#[async_trait]
pub trait WorldStore: Send + Sync {
    /// Write a World, replacing any existing document of that name.
    async fn save(&self, name: &str, world: &World) -> FolioResult<()>;

    /// Read a World, failing with a not-found storage error if absent.
    async fn load(&self, name: &str) -> FolioResult<World>;

    /// Whether a World of that name exists.
    async fn exists(&self, name: &str) -> FolioResult<bool>;

    /// Names of every stored World, sorted.
    async fn list(&self) -> FolioResult<Vec<String>>;

    /// Store name for logging (e.g., "filesystem", "memory").
    fn store_name(&self) -> &'static str;

    /// Create a World with one empty segment.
    ///
    /// Overwrites any existing World of the same name.
    async fn create(&self, name: &str, description: serde_json::Value) -> FolioResult<World> {
        let world = World::new(description);
        self.save(name, &world).await?;
        tracing::info!(store = self.store_name(), world = name, "Created world");
        Ok(world)
    }

    /// Empty a World's backstory, keeping its description.
    async fn clear(&self, name: &str) -> FolioResult<World> {
        let mut world = self.load(name).await?;
        world.clear_backstory();
        self.save(name, &world).await?;
        tracing::info!(store = self.store_name(), world = name, "Cleared backstory");
        Ok(world)
    }

    /// Append `"\n" + text` to a segment and persist the whole World.
    async fn append_to_segment(
        &self,
        name: &str,
        world: &mut World,
        index: usize,
        text: &str,
    ) -> FolioResult<()> {
        world.append_to_segment(index, text)?;
        self.save(name, world).await?;
        tracing::debug!(
            store = self.store_name(),
            world = name,
            segment = index,
            appended = text.len(),
            "Appended completion"
        );
        Ok(())
    }
}
