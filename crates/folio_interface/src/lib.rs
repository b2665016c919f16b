//! Trait definitions for the Folio narrative continuation engine.
//!
//! The continuation core talks to its collaborators only through these
//! traits: a [`CompletionDriver`] turns prompts into completions and a
//! [`WorldStore`] persists World documents.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod driver;
mod store;

pub use driver::CompletionDriver;
pub use store::WorldStore;
