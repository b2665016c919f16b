//! Core data types for the Folio narrative continuation engine.
//!
//! This crate provides the foundation types shared by every Folio crate:
//! the persisted [`World`] document, segment addressing, generation modes,
//! continuation requests and outcomes, provider-neutral completion
//! requests, and the layered [`FolioConfig`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod continuation;
mod message;
mod mode;
mod request;
mod role;
mod segment;
mod world;

pub use config::{FolioConfig, GenerationConfig, ProviderConfig, ServerConfig, StorageConfig};
pub use continuation::{
    ContinuationOutcome, ContinuationOutcomeBuilder, ContinuationRequest,
    ContinuationRequestBuilder,
};
pub use message::Message;
pub use mode::{GenerationMode, Protocol};
pub use request::{FinishReason, GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use segment::{SegmentIndex, SegmentState};
pub use world::{END_MARKER, World};
