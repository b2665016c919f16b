//! Generation modes and prompt protocols.

use serde::{Deserialize, Serialize};

/// Which kind of work a continuation produces.
///
/// # Examples
///
/// ```
/// use folio_core::GenerationMode;
/// use std::str::FromStr;
///
/// assert_eq!(GenerationMode::from_str("Scene").unwrap(), GenerationMode::Scene);
/// assert_eq!(GenerationMode::Story.to_string(), "story");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GenerationMode {
    /// Prose short story
    #[default]
    Story,
    /// Scene of a play
    Scene,
}

/// Prompt protocol: which tags the model is asked for and how history is compacted.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Protocol {
    /// `<info>` plan only; history compacts to info text
    #[default]
    Basic,
    /// `<info>` plan plus `<summary>` recap; history compacts to summaries
    Enhanced,
}
