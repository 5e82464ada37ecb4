use shared::error::ApiError;
use thiserror::Error;

use crate::{
    draft::{KeepKeywordRejection, ReplacePairRejection},
    validate::ValidationResult,
};

/// Failure talking to the simplification service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },
    #[error("service rejected the request: {0}")]
    Status(ApiError),
    #[error("malformed response from {url}: {message}")]
    Decode { url: String, message: String },
    #[error("failed to encode request: {0}")]
    Encode(String),
    #[error("i/o failure: {0}")]
    Io(String),
}

impl TransportError {
    /// Network failures and transient service statuses can be retried as-is.
    /// Everything else needs the request or the environment to change first.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Status(err) => err.code.is_transient(),
            Self::Decode { .. } | Self::Encode(_) | Self::Io(_) => false,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();
        if err.is_decode() {
            Self::Decode {
                url,
                message: err.to_string(),
            }
        } else {
            Self::Network {
                url,
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err.to_string())
    }
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    #[error("draft is incomplete: {}", .0.messages().join(" "))]
    Validation(ValidationResult),
    #[error("Please upload only .docx files")]
    UnsupportedFileType { media_type: Option<String> },
    #[error("a simplification request is already in flight")]
    SubmissionInFlight,
    #[error("no results are being shown")]
    NotInResults,
    #[error("the draft cannot change while a request is in flight")]
    DraftLocked,
    #[error("no server-confirmed document is available for download")]
    ArtifactUnavailable,
    #[error(transparent)]
    KeepKeyword(#[from] KeepKeywordRejection),
    #[error(transparent)]
    ReplacePair(#[from] ReplacePairRejection),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl WorkflowError {
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(err) => err.is_retryable(),
            Self::SubmissionInFlight => true,
            _ => false,
        }
    }
}
