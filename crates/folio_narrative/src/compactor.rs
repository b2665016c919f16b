//! Bounded world context for prompts.

use crate::TaggedText;
use folio_core::{Protocol, World};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which annotation stands in for a historical segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum AnnotationPreference {
    /// The `<info>` plan
    InfoOnly,
    /// The `<summary>` recap, falling back to the plan when a segment has none
    SummaryFirst,
}

impl From<Protocol> for AnnotationPreference {
    fn from(protocol: Protocol) -> Self {
        match protocol {
            Protocol::Basic => Self::InfoOnly,
            Protocol::Enhanced => Self::SummaryFirst,
        }
    }
}

/// A World with every segment replaced by its annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactedWorld {
    /// The World's description, unchanged
    #[serde(rename = "Description")]
    pub description: Value,
    /// One annotation per segment; the excluded segment is empty
    #[serde(rename = "Previous Plots/Stories")]
    pub annotations: Vec<String>,
}

impl CompactedWorld {
    /// JSON blob placed after `World:` in a prompt.
    ///
    /// ```
    /// use folio_narrative::CompactedWorld;
    /// use serde_json::json;
    ///
    /// let compacted = CompactedWorld {
    ///     description: json!("Mars"),
    ///     annotations: vec!["recap".to_string(), String::new()],
    /// };
    /// assert_eq!(
    ///     compacted.to_prompt_blob(),
    ///     r#"{"Description":"Mars","Previous Plots/Stories":["recap",""]}"#
    /// );
    /// ```
    pub fn to_prompt_blob(&self) -> String {
        let mut blob = serde_json::Map::new();
        blob.insert("Description".to_string(), self.description.clone());
        blob.insert(
            "Previous Plots/Stories".to_string(),
            Value::from(self.annotations.clone()),
        );
        Value::Object(blob).to_string()
    }
}

/// Replace each segment with its annotation, blanking `exclude_index`.
///
/// An `exclude_index` past the end excludes nothing.
///
/// ```
/// use folio_core::World;
/// use folio_narrative::{compact, AnnotationPreference};
/// use serde_json::json;
///
/// let world = World {
///     description: json!({}),
///     backstory: vec!["<summary>recap</summary>".to_string(), "x".to_string()],
/// };
/// let compacted = compact(&world, 1, AnnotationPreference::SummaryFirst);
/// assert_eq!(compacted.annotations, vec!["recap", ""]);
/// ```
pub fn compact(world: &World, exclude_index: usize, preference: AnnotationPreference) -> CompactedWorld {
    let annotations = world
        .backstory
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            if i == exclude_index {
                return String::new();
            }
            let tagged = TaggedText::parse(raw);
            match preference {
                AnnotationPreference::InfoOnly => tagged.info().clone(),
                AnnotationPreference::SummaryFirst if tagged.summary().is_empty() => {
                    tagged.info().clone()
                }
                AnnotationPreference::SummaryFirst => tagged.summary().clone(),
            }
        })
        .collect();

    CompactedWorld {
        description: world.description.clone(),
        annotations,
    }
}
