//! Filesystem-backed World store.
//!
//! Each World lives in `{data_dir}/{name}.json` as pretty-printed JSON:
//!
//! ```text
//! data/
//! ├── world0.json   {"description": ..., "backstory": ["...", "..."]}
//! └── mars.json
//! ```

use crate::validate_world_name;
use folio_core::World;
use folio_error::{FolioResult, StorageError, StorageErrorKind};
use folio_interface::WorldStore;
use std::path::{Path, PathBuf};

/// Filesystem storage backend.
///
/// Writes go to a temp file that is renamed over the document.
#[derive(Debug, Clone)]
pub struct FileSystemWorldStore {
    data_dir: PathBuf,
}

impl FileSystemWorldStore {
    /// Create a store rooted at `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(data_dir))]
    pub fn new(data_dir: impl Into<PathBuf>) -> FolioResult<Self> {
        let data_dir = data_dir.into();

        std::fs::create_dir_all(&data_dir).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                data_dir.display(),
                e
            )))
        })?;

        tracing::info!(path = %data_dir.display(), "Opened world store");
        Ok(Self { data_dir })
    }

    /// Root directory of the store.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Document path for a World name.
    pub fn path_for(&self, name: &str) -> FolioResult<PathBuf> {
        validate_world_name(name)?;
        Ok(self.data_dir.join(format!("{}.json", name)))
    }
}

#[async_trait::async_trait]
impl WorldStore for FileSystemWorldStore {
    #[tracing::instrument(skip(self, world), fields(segments = world.len()))]
    async fn save(&self, name: &str, world: &World) -> FolioResult<()> {
        let path = self.path_for(name)?;

        let json = serde_json::to_string_pretty(world).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(format!("{}: {}", name, e)))
        })?;

        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, json).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %path.display(), "Saved world");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn load(&self, name: &str) -> FolioResult<World> {
        let path = self.path_for(name)?;

        let contents = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::WorldNotFound(name.to_string()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        let world: World = serde_json::from_str(&contents).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        tracing::debug!(segments = world.len(), "Loaded world");
        Ok(world)
    }

    async fn exists(&self, name: &str) -> FolioResult<bool> {
        let path = self.path_for(name)?;
        let exists = tokio::fs::try_exists(&path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", path.display(), e)))
        })?;
        Ok(exists)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> FolioResult<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.data_dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                self.data_dir.display(),
                e
            )))
        })?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                self.data_dir.display(),
                e
            )))
        })? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }

        names.sort();
        tracing::debug!(count = names.len(), "Listed worlds");
        Ok(names)
    }

    fn store_name(&self) -> &'static str {
        "filesystem"
    }
}
