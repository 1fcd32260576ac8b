use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type RequestId = u64;

/// Outbound body. Serialises to `{"url": ..}` or `{"text": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnalysisRequest {
    Url { url: String },
    Text { text: String },
}

impl AnalysisRequest {
    pub fn url(url: impl Into<String>) -> Self {
        AnalysisRequest::Url { url: url.into() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        AnalysisRequest::Text { text: text.into() }
    }

    pub fn path(&self) -> &'static str {
        match self {
            AnalysisRequest::Url { .. } => "/analyze",
            AnalysisRequest::Text { .. } => "/analyze-text",
        }
    }
}

/// Body of a successful `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlReport {
    pub status: String,
    pub message: String,
    pub reasons: Vec<String>,
    pub phishing_score: Option<String>,
}

/// Body of a successful `POST /analyze-text`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextReport {
    pub verdict: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisResponse {
    Url(UrlReport),
    Text(TextReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Completed {
        request_id: RequestId,
        result: Result<AnalysisResponse, AnalysisError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct AnalysisError {
    pub kind: FailureKind,
    pub message: String,
}

impl AnalysisError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    InvalidRequest,
    Network,
    Timeout,
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedResponse,
    Cancelled,
    /// The client itself failed, e.g. panicked, before producing a response.
    Internal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Internal => write!(f, "internal client failure"),
        }
    }
}

// Wire shapes are lenient: a missing or null field reads as empty, only a body
// that is not a JSON object is rejected.
#[derive(Debug, Deserialize)]
struct RawUrlReport {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    reasons: Option<Vec<String>>,
    #[serde(default)]
    phishing_score: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawTextReport {
    #[serde(default)]
    verdict: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
}

/// Interprets a 2xx body according to the request that produced it.
pub fn parse_response(
    request: &AnalysisRequest,
    body: &[u8],
) -> Result<AnalysisResponse, AnalysisError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| AnalysisError::new(FailureKind::MalformedResponse, err.to_string()))?;
    if !value.is_object() {
        return Err(AnalysisError::new(
            FailureKind::MalformedResponse,
            "body is not a JSON object",
        ));
    }

    match request {
        AnalysisRequest::Url { .. } => {
            let raw: RawUrlReport = serde_json::from_value(value).map_err(malformed)?;
            Ok(AnalysisResponse::Url(UrlReport {
                status: raw.status.unwrap_or_default(),
                message: raw.message.unwrap_or_default(),
                reasons: raw.reasons.unwrap_or_default(),
                phishing_score: raw.phishing_score.and_then(score_text),
            }))
        }
        AnalysisRequest::Text { .. } => {
            let raw: RawTextReport = serde_json::from_value(value).map_err(malformed)?;
            Ok(AnalysisResponse::Text(TextReport {
                verdict: raw.verdict.unwrap_or_default(),
                explanation: raw.explanation.unwrap_or_default(),
            }))
        }
    }
}

fn malformed(err: serde_json::Error) -> AnalysisError {
    AnalysisError::new(FailureKind::MalformedResponse, err.to_string())
}

// The server sends the score as a string; accept a bare number too.
fn score_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
