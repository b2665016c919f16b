//! Folio - narrative continuation engine
//!
//! Folio grows long-form fiction one completion at a time. A named World holds
//! a setting description and a backstory of segments; each continuation
//! compiles a prompt from the World, asks a completion provider for more text,
//! appends the raw completion to the target segment and returns the narrative
//! with the model's planning annotations stripped.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use folio::{
//!     ContinuationExecutor, ContinuationRequestBuilder, FileSystemWorldStore, FolioConfig,
//!     OpenAICompatibleClient, WorldStore,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FolioConfig::load()?;
//!     let store = Arc::new(FileSystemWorldStore::new(config.storage().data_dir())?);
//!     store.create("world0", serde_json::json!({"planet": "Mars"})).await?;
//!
//!     let client = OpenAICompatibleClient::from_provider_config(config.provider())?;
//!     let executor = ContinuationExecutor::from_config(client, store, &config)?;
//!
//!     let request = ContinuationRequestBuilder::default()
//!         .topic("discovering mars")
//!         .build()?;
//!     let outcome = executor.continue_segment(&request).await?;
//!     println!("{}", outcome.narrative_text());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `folio_error` - Error types
//! - `folio_core` - World, requests, configuration
//! - `folio_interface` - `CompletionDriver` and `WorldStore` traits
//! - `folio_storage` - File system and in-memory World stores
//! - `folio_narrative` - Tag extraction, compaction, prompts, orchestration
//! - `folio_models` - OpenAI-compatible completion client
//! - `folio_server` - HTTP transport
//!
//! This crate (`folio`) re-exports everything for convenience.

pub use folio_core::*;
pub use folio_error::*;
pub use folio_interface::*;
pub use folio_models::*;
pub use folio_narrative::*;
pub use folio_server::*;
pub use folio_storage::{FileSystemWorldStore, InMemoryWorldStore, validate_world_name};
