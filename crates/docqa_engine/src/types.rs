use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A local file read from disk, ready to be sent to `/upload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub media_type: String,
}

/// Successful `/upload` response body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub document_chunks: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct AskRequest<'a> {
    pub question: &'a str,
}

/// Successful `/ask` response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
    #[serde(default)]
    pub source_documents: Vec<SourceDocument>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceDocument {
    pub content: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Body of the backend root endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceStatus {
    #[serde(default)]
    pub message: String,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    UploadCompleted {
        result: Result<UploadResponse, BackendError>,
    },
    AnswerCompleted {
        result: Result<AnswerResponse, BackendError>,
        elapsed: Duration,
        received_utc: String,
    },
    HealthChecked {
        result: Result<ServiceStatus, BackendError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    pub kind: FailureKind,
    pub message: String,
}

impl BackendError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for BackendError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    InvalidRequest,
    Rejected { status: u16 },
    Timeout,
    Network,
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::Rejected { status } => write!(f, "rejected with status {status}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}
