//! Interactive terminal error types.

/// Failures talking to the user's terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum TerminalErrorKind {
    /// Failed to write a prompt to the terminal
    #[display("Failed to write prompt: {}", _0)]
    PromptWrite(String),
    /// Failed to read a line of input
    #[display("Failed to read input: {}", _0)]
    InputRead(String),
}

/// Terminal error with source location tracking.
///
/// # Examples
///
/// ```
/// use folio_error::{TerminalError, TerminalErrorKind};
///
/// let err = TerminalError::new(TerminalErrorKind::InputRead("stdin closed".to_string()));
/// assert!(format!("{}", err).contains("read input"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Terminal Error: {} at line {} in {}", kind, line, file)]
pub struct TerminalError {
    /// Error kind
    pub kind: TerminalErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl TerminalError {
    /// Create a new TerminalError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TerminalErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
