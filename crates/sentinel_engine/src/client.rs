use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use sentinel_logging::{sentinel_debug, sentinel_trace};

use crate::{parse_response, AnalysisError, AnalysisRequest, AnalysisResponse, FailureKind};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Base URL of the analysis server; request paths are joined onto it.
    pub endpoint: String,
    /// `None` leaves connection setup to the OS network stack.
    pub connect_timeout: Option<Duration>,
    /// `None` waits for the server indefinitely.
    pub request_timeout: Option<Duration>,
    pub max_response_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: None,
            request_timeout: None,
            max_response_bytes: 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AnalysisError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalysisClient {
    client: reqwest::Client,
    base: Url,
    max_response_bytes: u64,
}

impl ReqwestAnalysisClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, AnalysisError> {
        let base = Url::parse(&settings.endpoint)
            .map_err(|err| AnalysisError::new(FailureKind::InvalidEndpoint, err.to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| AnalysisError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            base,
            max_response_bytes: settings.max_response_bytes,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }
}

#[async_trait::async_trait]
impl AnalysisClient for ReqwestAnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AnalysisError> {
        let target = endpoint_url(&self.base, request.path())?;
        let body = serde_json::to_vec(request)
            .map_err(|err| AnalysisError::new(FailureKind::InvalidRequest, err.to_string()))?;
        sentinel_debug!("POST {} ({} byte body)", target, body.len());

        let response = self
            .client
            .post(target)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        // Error bodies are never read; the status alone decides.
        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_response_bytes {
                return Err(too_large(self.max_response_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_response_bytes {
                return Err(too_large(self.max_response_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        sentinel_trace!("received {} byte body from {}", bytes.len(), request.path());

        parse_response(request, &bytes)
    }
}

/// Joins `path` onto `base`, keeping any path prefix the base already has
/// (`http://host/api` + `/analyze` gives `http://host/api/analyze`).
pub fn endpoint_url(base: &Url, path: &str) -> Result<Url, AnalysisError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path.trim_start_matches('/'))
        .map_err(|err| AnalysisError::new(FailureKind::InvalidEndpoint, err.to_string()))
}

fn too_large(max_bytes: u64, actual: u64) -> AnalysisError {
    AnalysisError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> AnalysisError {
    if err.is_timeout() {
        return AnalysisError::new(FailureKind::Timeout, err.to_string());
    }
    AnalysisError::new(FailureKind::Network, err.to_string())
}
