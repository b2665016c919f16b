//! World name validation.

use folio_error::{StorageError, StorageErrorKind};

/// Check that a World name can be used as a storage key.
///
/// Names must be non-empty and must not contain path separators or `..`.
///
/// ```
/// use folio_storage::validate_world_name;
///
/// assert!(validate_world_name("world0").is_ok());
/// assert!(validate_world_name("../etc/passwd").is_err());
/// assert!(validate_world_name("").is_err());
/// ```
pub fn validate_world_name(name: &str) -> Result<(), StorageError> {
    if name.trim().is_empty() {
        return Err(StorageError::new(StorageErrorKind::InvalidPath(
            "world name is empty".to_string(),
        )));
    }
    if name.contains(['/', '\\']) || name.contains("..") {
        return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
            "world name '{}' must not contain path separators or '..'",
            name
        ))));
    }
    Ok(())
}
