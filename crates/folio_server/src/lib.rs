//! HTTP transport for the Folio narrative continuation engine.
//!
//! Routes:
//!
//! - `GET  /api/status`: liveness
//! - `POST /api/worlds`: create (or overwrite) a World
//! - `POST /api/generate_story`: one continuation round
//! - `POST /api/clear_worlds`: empty every World's backstory
//!
//! Continuations against the same World are serialized by [`WorldLocks`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod locks;
mod routes;
mod server;
mod state;

pub use error::ApiError;
pub use locks::{WorldGuard, WorldLocks};
pub use routes::{create_router, ClearWorldsResponse, CreateWorldRequest};
pub use server::serve;
pub use state::AppState;
