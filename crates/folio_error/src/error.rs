//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, JsonError, NarrativeError, ProviderError, ServerError, StorageError,
    TerminalError,
};

/// Every error condition a Folio operation can surface.
///
/// # Examples
///
/// ```
/// use folio_error::{FolioError, ConfigError};
///
/// let config_err = ConfigError::new("Missing data_dir");
/// let err: FolioError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FolioErrorKind {
    /// World persistence error
    #[from(StorageError)]
    Storage(StorageError),
    /// Narrative engine error
    #[from(NarrativeError)]
    Narrative(NarrativeError),
    /// Completion provider error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// HTTP transport error
    #[from(ServerError)]
    Server(ServerError),
    /// Interactive terminal error
    #[from(TerminalError)]
    Terminal(TerminalError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
}

/// Folio error with kind discrimination.
///
/// # Examples
///
/// ```
/// use folio_error::{FolioErrorKind, FolioResult, ProviderError, ProviderErrorKind};
///
/// fn might_fail() -> FolioResult<()> {
///     Err(ProviderError::new(ProviderErrorKind::EmptyResponse))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), FolioErrorKind::Provider(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Folio Error: {}", _0)]
pub struct FolioError(Box<FolioErrorKind>);

impl FolioError {
    /// Create a new error from a kind.
    pub fn new(kind: FolioErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FolioErrorKind {
        &self.0
    }

    /// Whether this error means the named World does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.kind(),
            FolioErrorKind::Storage(e) if matches!(e.kind, crate::StorageErrorKind::WorldNotFound(_))
        )
    }
}

// Generic From implementation for any type that converts to FolioErrorKind
impl<T> From<T> for FolioError
where
    T: Into<FolioErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Folio operations.
///
/// # Examples
///
/// ```
/// use folio_error::{FolioResult, JsonError};
///
/// fn parse() -> FolioResult<String> {
///     Err(JsonError::new("expected value at line 1 column 1"))?
/// }
/// assert!(parse().is_err());
/// ```
pub type FolioResult<T> = std::result::Result<T, FolioError>;
