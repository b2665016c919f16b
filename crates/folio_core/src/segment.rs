//! Segment addressing and lifecycle.

use folio_error::{NarrativeError, NarrativeErrorKind};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Which backstory segment a continuation targets.
///
/// Parsed from an integer or a string: `"new"` opens a fresh segment,
/// `"last"`, `-1` and `"-1"` address the final segment, and non-negative
/// integers address a segment directly.
///
/// # Examples
///
/// ```
/// use folio_core::SegmentIndex;
///
/// let new: SegmentIndex = "new".parse().unwrap();
/// assert_eq!(new, SegmentIndex::New);
///
/// let last: SegmentIndex = serde_json::from_str("-1").unwrap();
/// assert_eq!(last, SegmentIndex::Last);
///
/// let third: SegmentIndex = serde_json::from_str("\"2\"").unwrap();
/// assert_eq!(third, SegmentIndex::At(2));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SegmentIndex {
    /// Append a new empty segment and target it
    #[default]
    #[display("new")]
    New,
    /// The final segment of the backstory
    #[display("last")]
    Last,
    /// A specific segment
    #[display("{}", _0)]
    At(usize),
}

impl SegmentIndex {
    /// Interpret a signed integer index.
    pub fn from_signed(value: i64) -> Result<Self, NarrativeError> {
        match value {
            -1 => Ok(Self::Last),
            v if v >= 0 => usize::try_from(v)
                .map(Self::At)
                .map_err(|_| NarrativeError::new(NarrativeErrorKind::InvalidSegmentIndex(v.to_string()))),
            v => Err(NarrativeError::new(
                NarrativeErrorKind::InvalidSegmentIndex(v.to_string()),
            )),
        }
    }
}

impl FromStr for SegmentIndex {
    type Err = NarrativeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("new") {
            return Ok(Self::New);
        }
        if trimmed.eq_ignore_ascii_case("last") {
            return Ok(Self::Last);
        }
        trimmed
            .parse::<i64>()
            .map_err(|_| NarrativeError::new(NarrativeErrorKind::InvalidSegmentIndex(s.to_string())))
            .and_then(Self::from_signed)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSegmentIndex {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for SegmentIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match RawSegmentIndex::deserialize(deserializer)? {
            RawSegmentIndex::Number(n) => Self::from_signed(n),
            RawSegmentIndex::Text(s) => s.parse(),
        };
        parsed.map_err(|e| serde::de::Error::custom(e.kind))
    }
}

impl Serialize for SegmentIndex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::At(n) => serializer.serialize_u64(*n as u64),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

/// Lifecycle position of a segment, derived from its raw text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SegmentState {
    /// Nothing generated yet
    Empty,
    /// At least one round appended, no end marker yet
    InProgress,
    /// The last round ended with the end marker
    Terminal,
}

impl SegmentState {
    /// Classify raw segment text.
    ///
    /// ```
    /// use folio_core::SegmentState;
    ///
    /// assert_eq!(SegmentState::of(""), SegmentState::Empty);
    /// assert_eq!(SegmentState::of("\n# Title"), SegmentState::InProgress);
    /// assert_eq!(SegmentState::of("\n### THE END.\n<end>\n"), SegmentState::Terminal);
    /// ```
    pub fn of(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self::Empty
        } else if raw.trim_end().ends_with(crate::END_MARKER) {
            Self::Terminal
        } else {
            Self::InProgress
        }
    }
}
