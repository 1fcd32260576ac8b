//! Sentinel engine: HTTP client for the analysis server and effect execution.
mod client;
mod engine;
mod types;

pub use client::{
    endpoint_url, AnalysisClient, ClientSettings, ReqwestAnalysisClient, DEFAULT_ENDPOINT,
};
pub use engine::{EngineError, EngineHandle};
pub use types::{
    parse_response, AnalysisError, AnalysisRequest, AnalysisResponse, EngineEvent, FailureKind,
    RequestId, TextReport, UrlReport,
};
