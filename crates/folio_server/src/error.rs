//! Error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use folio_error::{FolioError, FolioErrorKind, NarrativeErrorKind, StorageErrorKind};
use serde_json::json;

/// A failed request, rendered as `{"error": ...}` with a mapped status.
#[derive(Debug)]
pub enum ApiError {
    /// An engine error
    Folio(FolioError),
    /// The request body could not be read
    BadRequest(String),
}

impl From<FolioError> for ApiError {
    fn from(err: FolioError) -> Self {
        Self::Folio(err)
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        let err = match self {
            Self::BadRequest(_) => return StatusCode::BAD_REQUEST,
            Self::Folio(err) => err,
        };
        match err.kind() {
            FolioErrorKind::Storage(e) => match e.kind {
                StorageErrorKind::WorldNotFound(_) => StatusCode::NOT_FOUND,
                StorageErrorKind::InvalidPath(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            FolioErrorKind::Narrative(e) => match e.kind {
                NarrativeErrorKind::SegmentOutOfRange { .. }
                | NarrativeErrorKind::InvalidSegmentIndex(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            FolioErrorKind::Provider(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message without source locations.
    pub fn message(&self) -> String {
        match self {
            Self::BadRequest(message) => message.clone(),
            Self::Folio(err) => match err.kind() {
                FolioErrorKind::Storage(e) => e.kind.to_string(),
                FolioErrorKind::Narrative(e) => e.kind.to_string(),
                FolioErrorKind::Provider(e) => e.kind.to_string(),
                other => other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.message(), "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.message(), "Request rejected");
        }
        (status, Json(json!({"error": self.message()}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_error::{NarrativeError, ProviderError, ProviderErrorKind, StorageError};

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(FolioError, StatusCode)> = vec![
            (
                StorageError::new(StorageErrorKind::WorldNotFound("w".into())).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                StorageError::new(StorageErrorKind::InvalidPath("../w".into())).into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                NarrativeError::new(NarrativeErrorKind::SegmentOutOfRange { index: 3, len: 1 }).into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                ProviderError::new(ProviderErrorKind::EmptyResponse).into(),
                StatusCode::BAD_GATEWAY,
            ),
            (
                StorageError::new(StorageErrorKind::FileWrite("disk full".into())).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_message_hides_location() {
        let err = ApiError::from(FolioError::from(StorageError::new(
            StorageErrorKind::WorldNotFound("w".into()),
        )));
        assert_eq!(err.message(), "World not found: w");
    }
}
