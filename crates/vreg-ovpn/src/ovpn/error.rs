//! Error types for profile intake.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A required directive the profile lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigIssue {
    MissingRemote,
    MissingCa,
    MissingDev,
}

impl ConfigIssue {
    /// Every issue, in the order checks run.
    pub const ALL: [ConfigIssue; 3] = [Self::MissingRemote, Self::MissingCa, Self::MissingDev];
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRemote => write!(f, "Missing 'remote' directive (server address)"),
            Self::MissingCa => write!(f, "Missing CA certificate (<ca> block or 'ca' directive)"),
            Self::MissingDev => write!(f, "Missing 'dev' directive (e.g., 'dev tun')"),
        }
    }
}

impl std::error::Error for ConfigIssue {}

/// Why an upload was not accepted into the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntakeError {
    /// Upload exceeds the configured size limit
    TooLarge { size: usize, limit: usize },
    /// Upload is not valid UTF-8
    InvalidEncoding(String),
    /// Profile failed validation; messages in check order
    Rejected(Vec<String>),
    /// Settings could not be loaded or are inconsistent
    Settings(String),
    /// File I/O error
    Io(String),
}

impl fmt::Display for IntakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge { size, limit } => {
                write!(f, "Upload too large: {} bytes (limit {})", size, limit)
            }
            Self::InvalidEncoding(msg) => write!(f, "Upload is not valid UTF-8: {}", msg),
            Self::Rejected(errors) => write!(f, "Invalid OpenVPN profile: {}", errors.join("; ")),
            Self::Settings(msg) => write!(f, "Settings error: {}", msg),
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for IntakeError {}

pub type IntakeResult<T> = Result<T, IntakeError>;

impl IntakeError {
    /// HTTP status a request handler should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::TooLarge { .. } => 413,
            Self::InvalidEncoding(_) => 415,
            Self::Rejected(_) => 400,
            Self::Settings(_) | Self::Io(_) => 500,
        }
    }

    /// Messages for the response body. A rejection keeps every validation
    /// error; other kinds yield their display text.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Rejected(errors) => errors.clone(),
            other => vec![other.to_string()],
        }
    }

    /// JSON response body: `{"errors": [...]}`.
    pub fn to_body(&self) -> serde_json::Value {
        serde_json::json!({ "errors": self.messages() })
    }
}

impl From<std::io::Error> for IntakeError {
    fn from(e: std::io::Error) -> Self { Self::Io(e.to_string()) }
}

impl From<serde_json::Error> for IntakeError {
    fn from(e: serde_json::Error) -> Self { Self::Settings(e.to_string()) }
}

impl From<std::str::Utf8Error> for IntakeError {
    fn from(e: std::str::Utf8Error) -> Self { Self::InvalidEncoding(e.to_string()) }
}
