//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Chat roles understood by OpenAI-compatible providers.
///
/// # Examples
///
/// ```
/// use folio_core::Role;
///
/// assert_eq!(format!("{}", Role::User), "user");
/// assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System messages provide context and instructions
    #[display("system")]
    System,
    /// User messages carry the compiled prompt
    #[display("user")]
    User,
    /// Assistant messages are model output
    #[display("assistant")]
    Assistant,
}
