//! Continuation requests and outcomes.

use crate::{GenerationMode, SegmentIndex};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

fn default_topic() -> String {
    "default topic".to_string()
}

fn default_language() -> String {
    "English".to_string()
}

fn default_world_name() -> String {
    "world0".to_string()
}

/// One request to extend a segment by a single generation round.
///
/// Every field has a default, so `{}` deserializes to a story about
/// "default topic" in English, opening a new segment of `world0`.
/// `current_content_idx` is accepted for `segment_index` and `world` for
/// `world_name`.
///
/// # Examples
///
/// ```
/// use folio_core::{ContinuationRequest, ContinuationRequestBuilder, GenerationMode, SegmentIndex};
///
/// let request = ContinuationRequestBuilder::default()
///     .topic("discovering mars")
///     .world_name("world0")
///     .segment_index(SegmentIndex::Last)
///     .mode(GenerationMode::Scene)
///     .build()
///     .unwrap();
/// assert_eq!(request.language(), "English");
///
/// let parsed: ContinuationRequest =
///     serde_json::from_str(r#"{"current_content_idx": -1, "world": "w"}"#).unwrap();
/// assert_eq!(*parsed.segment_index(), SegmentIndex::Last);
/// assert_eq!(parsed.world_name(), "w");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct ContinuationRequest {
    /// What the work is about
    #[builder(default = "default_topic()")]
    #[serde(default = "default_topic")]
    topic: String,

    /// Language the work is written in
    #[builder(default = "default_language()")]
    #[serde(default = "default_language")]
    language: String,

    /// Name of the World to extend
    #[builder(default = "default_world_name()")]
    #[serde(default = "default_world_name", alias = "world")]
    world_name: String,

    /// Target segment
    #[builder(default)]
    #[serde(default, alias = "current_content_idx")]
    segment_index: SegmentIndex,

    /// Story or scene
    #[builder(default)]
    #[serde(default)]
    mode: GenerationMode,
}

impl ContinuationRequest {
    /// Same request aimed at a different segment.
    pub fn with_segment(&self, segment_index: SegmentIndex) -> Self {
        Self {
            segment_index,
            ..self.clone()
        }
    }
}

impl Default for ContinuationRequest {
    fn default() -> Self {
        Self {
            topic: default_topic(),
            language: default_language(),
            world_name: default_world_name(),
            segment_index: SegmentIndex::default(),
            mode: GenerationMode::default(),
        }
    }
}

/// Result of one continuation round.
#[derive(
    Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct ContinuationOutcome {
    /// Narrative text of this round, tags removed
    narrative_text: String,
    /// Whether this round ended the work
    terminal: bool,
    /// Resolved index of the segment that was extended
    segment_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_uses_defaults() {
        let request: ContinuationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, ContinuationRequest::default());
        assert_eq!(request.topic(), "default topic");
        assert_eq!(*request.segment_index(), SegmentIndex::New);
        assert_eq!(*request.mode(), GenerationMode::Story);
    }

    #[test]
    fn test_string_index_alias() {
        let request: ContinuationRequest =
            serde_json::from_str(r#"{"current_content_idx": "new", "mode": "scene"}"#).unwrap();
        assert_eq!(*request.segment_index(), SegmentIndex::New);
        assert_eq!(*request.mode(), GenerationMode::Scene);
    }

    #[test]
    fn test_with_segment_keeps_other_fields() {
        let request = ContinuationRequestBuilder::default()
            .topic("tides")
            .build()
            .unwrap();
        let next = request.with_segment(SegmentIndex::At(4));
        assert_eq!(next.topic(), "tides");
        assert_eq!(*next.segment_index(), SegmentIndex::At(4));
    }

    #[test]
    fn test_outcome_builder_requires_fields() {
        assert!(ContinuationOutcomeBuilder::default().build().is_err());
        let outcome = ContinuationOutcomeBuilder::default()
            .narrative_text("# Title")
            .terminal(false)
            .segment_index(1usize)
            .build()
            .unwrap();
        assert_eq!(outcome.narrative_text(), "# Title");
    }
}
