//! User-facing toast notification model.

use serde::{Deserialize, Serialize};

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Neutral information.
    #[default]
    Info,
    /// A user action completed.
    Success,
    /// Simulated git activity.
    Git,
}

/// A toast addressed to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    /// Text shown to the user.
    pub message: String,
    /// Visual category.
    pub kind: NotificationKind,
}

impl Notification {
    /// Construct a notification.
    #[must_use]
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}
