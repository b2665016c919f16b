//! Error types for the Folio library.
//!
//! This crate provides the error types used throughout the Folio workspace.
//!
//! # Error Hierarchy
//!
//! Every area follows the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! All of them convert into [`FolioError`], so `?` works across crate boundaries.
//!
//! # Examples
//!
//! ```
//! use folio_error::{FolioResult, StorageError, StorageErrorKind};
//!
//! fn load_world() -> FolioResult<String> {
//!     Err(StorageError::new(StorageErrorKind::WorldNotFound("world0".to_string())))?
//! }
//!
//! match load_world() {
//!     Ok(world) => println!("Got: {}", world),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod json;
mod narrative;
mod provider;
mod server;
mod storage;
mod terminal;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{FolioError, FolioErrorKind, FolioResult};
pub use json::JsonError;
pub use narrative::{NarrativeError, NarrativeErrorKind};
pub use provider::{ProviderError, ProviderErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use terminal::{TerminalError, TerminalErrorKind};
