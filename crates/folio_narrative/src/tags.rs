//! Tag extraction from raw completions.
//!
//! Completions interleave narrative text with tag-delimited annotations:
//!
//! ```text
//! # The Long Night
//! <info>
//! Plan: introduce the keeper, then the storm.
//! </info>
//! ### Scene 1
//! KEEPER: The lamp is out.
//! <summary>
//! The keeper discovers the lamp has failed.
//! </summary>
//! ### THE END.
//! <end>
//! ```
//!
//! Lines are classified by prefix (leading whitespace ignored). An opening
//! tag's line carries no content unless the same line also closes the region
//! (`<summary>recap</summary>`). Narrative scanning stops at the first line
//! starting with `<end>`; annotation scanning continues to the end of text.
//! An unclosed region swallows every following line.

use derive_getters::Getters;
use folio_core::END_MARKER;

/// Opening tag of a forward-looking plan.
pub const INFO_OPEN: &str = "<info>";
/// Closing tag of a forward-looking plan.
pub const INFO_CLOSE: &str = "</info>";
/// Opening tag of a backward-looking recap.
pub const SUMMARY_OPEN: &str = "<summary>";
/// Closing tag of a backward-looking recap.
pub const SUMMARY_CLOSE: &str = "</summary>";

/// The three views of a raw completion or segment, from one scan.
///
/// # Examples
///
/// ```
/// use folio_narrative::TaggedText;
///
/// let raw = "# Title\n<info>\nplan\n</info>\n### Scene 1\nALICE: Hi.\n";
/// let tagged = TaggedText::parse(raw);
///
/// assert_eq!(tagged.narrative(), "# Title\n### Scene 1\nALICE: Hi.");
/// assert_eq!(tagged.info(), "plan");
/// assert!(tagged.summary().is_empty());
/// assert!(!tagged.terminal());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct TaggedText {
    /// Lines outside any region, up to the end marker, trimmed
    narrative: String,
    /// Lines inside `<info>` regions, joined in order, trimmed
    info: String,
    /// Lines inside `<summary>` regions, joined in order, trimmed
    summary: String,
    /// Whether the text (trailing whitespace trimmed) ends with the end marker
    #[getter(skip)]
    terminal: bool,
}

/// What a line opened or closed, if anything.
enum LineTag<'a> {
    /// Opening tag; `Some(inner)` when the same line also closes the region
    Open(Region, Option<&'a str>),
    Close(Region),
    End,
    Plain,
}

#[derive(Clone, Copy)]
enum Region {
    Info,
    Summary,
}

impl Region {
    fn tags(self) -> (&'static str, &'static str) {
        match self {
            Region::Info => (INFO_OPEN, INFO_CLOSE),
            Region::Summary => (SUMMARY_OPEN, SUMMARY_CLOSE),
        }
    }
}

fn classify(line: &str) -> LineTag<'_> {
    let line = line.trim_start();
    if line.starts_with(END_MARKER) {
        return LineTag::End;
    }
    for region in [Region::Info, Region::Summary] {
        let (open, close) = region.tags();
        if let Some(rest) = line.strip_prefix(open) {
            let inline = rest.find(close).map(|pos| &rest[..pos]);
            return LineTag::Open(region, inline);
        }
        if line.starts_with(close) {
            return LineTag::Close(region);
        }
    }
    LineTag::Plain
}

impl TaggedText {
    /// Scan raw text once, producing every view.
    pub fn parse(raw: &str) -> Self {
        let mut in_info = false;
        let mut in_summary = false;
        let mut ended = false;

        let mut narrative = Vec::new();
        let mut info = Vec::new();
        let mut summary = Vec::new();

        for line in raw.lines() {
            match classify(line) {
                LineTag::End => ended = true,
                LineTag::Open(Region::Info, Some(inner)) => info.push(inner),
                LineTag::Open(Region::Summary, Some(inner)) => summary.push(inner),
                LineTag::Open(Region::Info, None) => in_info = true,
                LineTag::Open(Region::Summary, None) => in_summary = true,
                LineTag::Close(Region::Info) => in_info = false,
                LineTag::Close(Region::Summary) => in_summary = false,
                LineTag::Plain => {
                    if in_info {
                        info.push(line);
                    }
                    if in_summary {
                        summary.push(line);
                    }
                    if !in_info && !in_summary && !ended {
                        narrative.push(line);
                    }
                }
            }
        }

        Self {
            narrative: narrative.join("\n").trim().to_string(),
            info: info.join("\n").trim().to_string(),
            summary: summary.join("\n").trim().to_string(),
            terminal: is_terminal(raw),
        }
    }

    /// Whether the text ended the work.
    pub fn terminal(&self) -> bool {
        self.terminal
    }

    /// Consume into the narrative text.
    pub fn into_narrative(self) -> String {
        self.narrative
    }
}

/// Narrative text with annotation regions and everything after `<end>` removed.
///
/// ```
/// use folio_narrative::extract_narrative;
///
/// let raw = "MORE: dialogue.\n### THE END.\n<end>";
/// assert_eq!(extract_narrative(raw), "MORE: dialogue.\n### THE END.");
/// ```
pub fn extract_narrative(raw: &str) -> String {
    TaggedText::parse(raw).narrative
}

/// Text of every `<info>` region, joined in order.
pub fn extract_info(raw: &str) -> String {
    TaggedText::parse(raw).info
}

/// Text of every `<summary>` region, joined in order.
pub fn extract_summary(raw: &str) -> String {
    TaggedText::parse(raw).summary
}

/// Whether raw text, trailing whitespace trimmed, ends with the end marker.
///
/// ```
/// use folio_narrative::is_terminal;
///
/// assert!(is_terminal("### THE END.\n<end>\n"));
/// assert!(!is_terminal("### Scene 2\n"));
/// ```
pub fn is_terminal(raw: &str) -> bool {
    raw.trim_end().ends_with(END_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_first_round() {
        let tagged = TaggedText::parse("# Title\n<info>\nplan\n</info>\n### Scene 1\nALICE: Hi.\n");
        assert_eq!(tagged.narrative(), "# Title\n### Scene 1\nALICE: Hi.");
        assert_eq!(tagged.info(), "plan");
        assert!(!tagged.terminal());
    }

    #[test]
    fn test_end_marker_stops_narrative() {
        let tagged = TaggedText::parse("MORE: dialogue.\n### THE END.\n<end>\ntrailing chatter");
        assert_eq!(tagged.narrative(), "MORE: dialogue.\n### THE END.");
        assert!(!tagged.terminal());
        assert!(TaggedText::parse("MORE: dialogue.\n### THE END.\n<end>").terminal());
    }

    #[test]
    fn test_narrative_is_idempotent() {
        let inputs = [
            "# T\n<info>\nplan\n</info>\nbody\n<end>",
            "  leading\n<summary>\nrecap\n</summary>\n\n\nmiddle\n  </info>\n",
            "<info>unclosed\nswallowed\n",
            "plain text only",
            "",
        ];
        for input in inputs {
            let once = extract_narrative(input);
            assert_eq!(extract_narrative(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_balanced_info_removed_line_for_line() {
        let input = "line one\n<info>\nplan a\nplan b\n</info>\nline two\n\nline three";
        assert_eq!(extract_narrative(input), "line one\nline two\n\nline three");
    }

    #[test]
    fn test_regions_joined_in_order() {
        let raw = "<info>\nfirst plan\n</info>\ntext\n<info>\nsecond plan\n</info>";
        assert_eq!(extract_info(raw), "first plan\nsecond plan");
    }

    #[test]
    fn test_one_line_region_captured() {
        let tagged = TaggedText::parse("<summary>recap</summary>\nnarrative");
        assert_eq!(tagged.summary(), "recap");
        assert_eq!(tagged.narrative(), "narrative");
    }

    #[test]
    fn test_opening_line_content_ignored() {
        let tagged = TaggedText::parse("<info> ignored\nkept plan\n</info>\nstory");
        assert_eq!(tagged.info(), "kept plan");
        assert_eq!(tagged.narrative(), "story");
    }

    #[test]
    fn test_unclosed_region_swallows_rest() {
        let tagged = TaggedText::parse("story\n<info>\nplan\nmore story");
        assert_eq!(tagged.narrative(), "story");
        assert_eq!(tagged.info(), "plan\nmore story");
    }

    #[test]
    fn test_close_without_open_is_ignored() {
        assert_eq!(extract_narrative("a\n</summary>\nb"), "a\nb");
    }

    #[test]
    fn test_annotations_after_end_still_collected() {
        let raw = "story\n<end>\n<summary>\nlate recap\n</summary>";
        assert_eq!(extract_summary(raw), "late recap");
        assert_eq!(extract_narrative(raw), "story");
    }

    #[test]
    fn test_internal_blank_lines_preserved() {
        assert_eq!(extract_narrative("\n\npara one\n\npara two\n\n"), "para one\n\npara two");
    }
}
