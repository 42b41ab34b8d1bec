use std::fmt;

use cinematch_core::{RecommendationResponse, RequestId};

/// Shown to the user whenever the service answered with something we cannot use.
pub const PARSE_FAILURE_MESSAGE: &str =
    "Could not connect to the cinematic database. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    RecommendationsCompleted {
        request_id: RequestId,
        result: Result<RecommendationResponse, ServiceError>,
    },
    PosterUnavailable {
        request_id: RequestId,
        index: usize,
        reason: ProbeError,
    },
}

/// Failure of a recommendation request. `detail` is diagnostic; use
/// [`ServiceError::user_message`] for anything shown on screen.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {detail}")]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub detail: String,
}

impl ServiceError {
    pub(crate) fn new(kind: ServiceErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::MalformedResponse, detail)
    }

    pub fn user_message(&self) -> String {
        match &self.kind {
            ServiceErrorKind::MalformedResponse => PARSE_FAILURE_MESSAGE.to_string(),
            ServiceErrorKind::Timeout => {
                "The recommendation service took too long to answer. Please try again.".to_string()
            }
            ServiceErrorKind::Network => {
                "Could not reach the recommendation service. Check your connection.".to_string()
            }
            ServiceErrorKind::HttpStatus(code) if self.detail.trim().is_empty() => {
                format!("The recommendation service rejected the request (HTTP {code}).")
            }
            ServiceErrorKind::HttpStatus(code) => format!(
                "The recommendation service rejected the request (HTTP {code}): {}",
                self.detail.trim()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceErrorKind {
    Network,
    Timeout,
    HttpStatus(u16),
    /// Body was not JSON, or the JSON did not match the declared schema.
    MalformedResponse,
}

impl fmt::Display for ServiceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceErrorKind::Network => write!(f, "network error"),
            ServiceErrorKind::Timeout => write!(f, "timeout"),
            ServiceErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            ServiceErrorKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("invalid poster url: {0}")]
    InvalidUrl(String),
    #[error("poster request failed with http status {0}")]
    HttpStatus(u16),
    #[error("poster is not an image ({content_type})")]
    NotAnImage { content_type: String },
    #[error("poster request failed: {0}")]
    Network(String),
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(String),
}
