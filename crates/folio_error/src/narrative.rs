//! Narrative engine error types.

/// Specific error conditions for narrative continuation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum NarrativeErrorKind {
    /// Segment index does not exist in the world's backstory
    #[display("Segment {} is out of range (backstory has {} segments)", index, len)]
    SegmentOutOfRange {
        /// Requested index
        index: usize,
        /// Number of segments in the backstory
        len: usize,
    },
    /// Segment index could not be parsed
    #[display("Invalid segment index: {}", _0)]
    InvalidSegmentIndex(String),
    /// Completion carried no narrative text outside of tag regions
    #[display("Completion has no extractable narrative text ({} bytes)", _0)]
    MalformedResponse(usize),
    /// Prompt template could not be loaded
    #[display("Template error: {}", _0)]
    TemplateError(String),
}

/// Error type for narrative operations.
///
/// # Examples
///
/// ```
/// use folio_error::{NarrativeError, NarrativeErrorKind};
///
/// let err = NarrativeError::new(NarrativeErrorKind::SegmentOutOfRange { index: 4, len: 2 });
/// assert!(format!("{}", err).contains("out of range"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Narrative Error: {} at line {} in {}", kind, line, file)]
pub struct NarrativeError {
    /// The specific error condition
    pub kind: NarrativeErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl NarrativeError {
    /// Create a new NarrativeError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: NarrativeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
