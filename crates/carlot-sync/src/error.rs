//! Sync error types.
//!
//! Every failure at the source/sink boundary lands in one of three
//! buckets. The controller turns each into an advisory message and keeps
//! running.

use std::fmt;

use thiserror::Error;

/// Admin write that was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkAction {
    Save,
    Delete,
}

impl fmt::Display for SinkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkAction::Save => write!(f, "save"),
            SinkAction::Delete => write!(f, "delete"),
        }
    }
}

/// Errors raised by sources and sinks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// The live or batch source could not be reached.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// The sheet was not valid tabular data.
    #[error("Malformed sheet: {0}")]
    ParseMalformed(String),

    /// The backing store rejected an admin write.
    #[error("Failed to {action} vehicle: {reason}")]
    SinkFailure { action: SinkAction, reason: String },
}

impl SyncError {
    pub fn sink(action: SinkAction, reason: impl Into<String>) -> Self {
        SyncError::SinkFailure {
            action,
            reason: reason.into(),
        }
    }

    /// User-facing message shown in place of the raw error.
    pub fn advisory(&self) -> String {
        match self {
            SyncError::SourceUnavailable(reason) if !reason.trim().is_empty() => {
                format!("Could not load inventory ({}); showing the last known listings.", reason)
            }
            SyncError::SourceUnavailable(_) => {
                "Could not load inventory, please try again later.".to_string()
            }
            SyncError::ParseMalformed(reason) => {
                format!("The inventory sheet could not be read ({}); nothing was imported.", reason)
            }
            SyncError::SinkFailure { action, .. } => {
                format!("Failed to {} vehicle, please try again later.", action)
            }
        }
    }
}

impl From<std::io::Error> for SyncError {
    fn from(e: std::io::Error) -> Self {
        SyncError::SourceUnavailable(e.to_string())
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        SyncError::SourceUnavailable(e.to_string())
    }
}

impl From<csv::Error> for SyncError {
    fn from(e: csv::Error) -> Self {
        SyncError::ParseMalformed(e.to_string())
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(e: serde_json::Error) -> Self {
        SyncError::ParseMalformed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_advisory_names_action() {
        let err = SyncError::sink(SinkAction::Delete, "permission denied");
        assert_eq!(err.advisory(), "Failed to delete vehicle, please try again later.");
        assert_eq!(err.to_string(), "Failed to delete vehicle: permission denied");
    }

    #[test]
    fn test_source_advisory_includes_reason() {
        let err = SyncError::SourceUnavailable("connection refused".to_string());
        assert!(err.advisory().contains("connection refused"));

        let blank = SyncError::SourceUnavailable(String::new());
        assert_eq!(blank.advisory(), "Could not load inventory, please try again later.");
    }

    #[test]
    fn test_parse_and_transport_are_distinct() {
        let io: SyncError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(io, SyncError::SourceUnavailable(_)));

        let json: SyncError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(json, SyncError::ParseMalformed(_)));
    }
}
