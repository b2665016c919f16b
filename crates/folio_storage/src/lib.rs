//! World document persistence for Folio.
//!
//! This crate provides [`WorldStore`] backends:
//!
//! - [`FileSystemWorldStore`]: one pretty-printed `{name}.json` file per World
//! - [`InMemoryWorldStore`]: a map guarded by an async lock, for tests and demos
//!
//! # Example
//!
//! ```rust
//! use folio_storage::{FileSystemWorldStore, WorldStore};
//! use folio_core::SegmentIndex;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileSystemWorldStore::new("/tmp/folio-worlds")?;
//! store.create("world0", json!({"setting": "Mars"})).await?;
//!
//! let mut world = store.load("world0").await?;
//! let (index, _) = world.read_segment(SegmentIndex::Last)?;
//! store.append_to_segment("world0", &mut world, index, "# Red Dust").await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod memory;
mod name;

pub use filesystem::FileSystemWorldStore;
pub use folio_error::{StorageError, StorageErrorKind};
pub use folio_interface::WorldStore;
pub use memory::InMemoryWorldStore;
pub use name::validate_world_name;
