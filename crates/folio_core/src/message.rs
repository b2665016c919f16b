//! Message types for completion requests.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single text message in a completion request.
///
/// # Examples
///
/// ```
/// use folio_core::{Message, Role};
///
/// let message = Message::user("Topic: mars");
/// assert_eq!(message.role, Role::User);
/// assert_eq!(message.content, "Topic: mars");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The text content of the message
    pub content: String,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}
