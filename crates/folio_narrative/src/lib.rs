//! Narrative continuation engine for Folio.
//!
//! This crate turns a persisted World into prompts and completions back into
//! World state:
//!
//! - [`TaggedText`] splits raw text into narrative, `<info>` and `<summary>` views
//! - [`PromptTemplate`] / [`TemplateSet`] hold the story and scene instructions
//! - [`compact`] replaces history with annotations so prompts stay bounded
//! - [`PromptCompiler`] assembles the final prompt
//! - [`ContinuationExecutor`] runs rounds against a driver and a store

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod compactor;
mod executor;
mod prompt;
mod tags;
mod template;

pub use compactor::{compact, AnnotationPreference, CompactedWorld};
pub use executor::ContinuationExecutor;
pub use prompt::{PromptCompiler, EMPTY_PLACEHOLDER};
pub use tags::{
    extract_info, extract_narrative, extract_summary, is_terminal, TaggedText, INFO_CLOSE,
    INFO_OPEN, SUMMARY_CLOSE, SUMMARY_OPEN,
};
pub use template::{PromptTemplate, TemplateSet};
