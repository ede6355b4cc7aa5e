//! Error types shared across the crate.

use std::fmt::{Display, Formatter};

/// Shared crate result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Error enumeration covering every failure mode of the board core.
///
/// Store mutations never fail: targeting an unknown task id is a no-op and
/// has no variant here.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// AI suggestion service transport, status, or timeout failure.
    Ai(String),
    /// AI suggestion service answered with a payload that does not fit the
    /// expected planning shape.
    MalformedResponse(String),
    /// File-system or I/O operation failure.
    Io(String),
}

impl AppError {
    /// Whether the error originates from the AI suggestion service.
    ///
    /// Both transport and malformed-payload failures degrade the assist
    /// feature to "unavailable" in the same way.
    #[must_use]
    pub fn is_ai_unavailable(&self) -> bool {
        matches!(self, Self::Ai(_) | Self::MalformedResponse(_))
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Ai(msg) => write!(f, "ai: {msg}"),
            Self::MalformedResponse(msg) => write!(f, "malformed response: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Ai(format!("request timed out: {err}"))
        } else {
            Self::Ai(err.to_string())
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
