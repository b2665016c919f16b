//! The persisted World document.

use crate::{SegmentIndex, SegmentState};
use folio_error::{NarrativeError, NarrativeErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Line marker the model emits when a work is finished.
pub const END_MARKER: &str = "<end>";

/// Persisted narrative state: a setting description and an ordered backstory.
///
/// Segments are append-only. Each generation round is concatenated onto its
/// segment after a separating newline, and segments are never removed one by
/// one; [`World::clear_backstory`] empties the whole list.
///
/// # Examples
///
/// ```
/// use folio_core::{SegmentIndex, World};
/// use serde_json::json;
///
/// let mut world = World::new(json!({"setting": "Mars, 2140"}));
/// assert_eq!(world.len(), 1);
///
/// let (index, text) = world.read_segment(SegmentIndex::New).unwrap();
/// assert_eq!((index, text), (1, ""));
///
/// world.append_to_segment(1, "# Red Dust").unwrap();
/// assert_eq!(world.segment(1), Some("\n# Red Dust"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Opaque setting description
    pub description: Value,
    /// Raw segment texts, oldest first
    #[serde(default)]
    pub backstory: Vec<String>,
}

impl World {
    /// A fresh World holding one empty segment.
    pub fn new(description: Value) -> Self {
        Self {
            description,
            backstory: vec![String::new()],
        }
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.backstory.len()
    }

    /// Whether the backstory has no segments.
    pub fn is_empty(&self) -> bool {
        self.backstory.is_empty()
    }

    /// Raw text of a segment.
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.backstory.get(index).map(String::as_str)
    }

    /// Lifecycle state of a segment.
    pub fn segment_state(&self, index: usize) -> Option<SegmentState> {
        self.segment(index).map(SegmentState::of)
    }

    /// Append a new empty segment and return its index.
    pub fn open_segment(&mut self) -> usize {
        self.backstory.push(String::new());
        self.backstory.len() - 1
    }

    /// Resolve a [`SegmentIndex`] to a concrete position.
    ///
    /// `SegmentIndex::New` opens a new segment as a side effect.
    pub fn resolve(&mut self, index: SegmentIndex) -> Result<usize, NarrativeError> {
        match index {
            SegmentIndex::New => Ok(self.open_segment()),
            SegmentIndex::Last => self.backstory.len().checked_sub(1).ok_or_else(|| {
                NarrativeError::new(NarrativeErrorKind::InvalidSegmentIndex(
                    "last (backstory is empty)".to_string(),
                ))
            }),
            SegmentIndex::At(i) if i < self.backstory.len() => Ok(i),
            SegmentIndex::At(i) => Err(NarrativeError::new(
                NarrativeErrorKind::SegmentOutOfRange {
                    index: i,
                    len: self.backstory.len(),
                },
            )),
        }
    }

    /// Resolve an index and return it with the segment's raw text.
    ///
    /// `SegmentIndex::New` opens a new segment as a side effect.
    pub fn read_segment(&mut self, index: SegmentIndex) -> Result<(usize, &str), NarrativeError> {
        let resolved = self.resolve(index)?;
        Ok((resolved, self.backstory[resolved].as_str()))
    }

    /// Concatenate a newline and `text` onto an existing segment.
    pub fn append_to_segment(&mut self, index: usize, text: &str) -> Result<(), NarrativeError> {
        let len = self.backstory.len();
        let segment = self
            .backstory
            .get_mut(index)
            .ok_or_else(|| NarrativeError::new(NarrativeErrorKind::SegmentOutOfRange { index, len }))?;
        segment.push('\n');
        segment.push_str(text);
        Ok(())
    }

    /// Drop every segment, keeping the description.
    pub fn clear_backstory(&mut self) {
        self.backstory.clear();
    }
}
