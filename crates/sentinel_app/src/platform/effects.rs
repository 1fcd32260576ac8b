use std::collections::HashMap;

use sentinel_core::{
    AnalysisFailed, AnalysisResult, Effect, Mode, Msg, RequestId, TextAnalysisResult, TextVerdict,
    UrlStatus,
};
use sentinel_engine::{
    AnalysisRequest, AnalysisResponse, EngineError, EngineEvent, EngineHandle, TextReport,
    UrlReport,
};
use sentinel_logging::{sentinel_info, sentinel_warn};

/// Where submitted requests go and completions come back from.
pub trait AnalysisBackend {
    /// An `Err` means the request was not accepted and will never complete.
    fn submit(&self, request_id: RequestId, request: AnalysisRequest) -> Result<(), EngineError>;
    fn try_recv(&self) -> Option<EngineEvent>;
}

impl AnalysisBackend for EngineHandle {
    fn submit(&self, request_id: RequestId, request: AnalysisRequest) -> Result<(), EngineError> {
        EngineHandle::submit(self, request_id, request)
    }

    fn try_recv(&self) -> Option<EngineEvent> {
        EngineHandle::try_recv(self)
    }
}

/// Turns core effects into backend requests and backend events into core messages.
pub struct EffectRunner<B> {
    backend: B,
    in_flight: HashMap<RequestId, Mode>,
    // Failures for submits the backend refused, reported on the next drain.
    refused: Vec<Msg>,
}

impl<B: AnalysisBackend> EffectRunner<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            in_flight: HashMap::new(),
            refused: Vec::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitUrl { request_id, url } => {
                    sentinel_info!(
                        "SubmitUrl request_id={} url_len={} url={}",
                        request_id,
                        url.len(),
                        url
                    );
                    self.submit(Mode::Url, request_id, AnalysisRequest::url(url));
                }
                Effect::SubmitText { request_id, text } => {
                    // User text may be private; log its size only.
                    sentinel_info!("SubmitText request_id={} text_len={}", request_id, text.len());
                    self.submit(Mode::Text, request_id, AnalysisRequest::text(text));
                }
            }
        }
    }

    fn submit(&mut self, mode: Mode, request_id: RequestId, request: AnalysisRequest) {
        match self.backend.submit(request_id, request) {
            Ok(()) => {
                self.in_flight.insert(request_id, mode);
            }
            Err(err) => {
                sentinel_warn!(
                    "{:?} analysis request_id={} was not submitted: {}",
                    mode,
                    request_id,
                    err
                );
                self.refused.push(failed(mode, request_id));
            }
        }
    }

    /// Collects every completion the backend has ready, without blocking.
    pub fn drain(&mut self) -> Vec<Msg> {
        let mut inbox = std::mem::take(&mut self.refused);
        while let Some(event) = self.backend.try_recv() {
            if let Some(msg) = self.map_event(event) {
                inbox.push(msg);
            }
        }
        inbox
    }

    fn map_event(&mut self, event: EngineEvent) -> Option<Msg> {
        match event {
            EngineEvent::Completed { request_id, result } => {
                let Some(mode) = self.in_flight.remove(&request_id) else {
                    sentinel_warn!("Completion for unknown request_id={}", request_id);
                    return None;
                };
                let msg = match (mode, result) {
                    (Mode::Url, Ok(AnalysisResponse::Url(report))) => Msg::UrlAnalysisDone {
                        request_id,
                        result: Ok(map_url_report(report)),
                    },
                    (Mode::Text, Ok(AnalysisResponse::Text(report))) => Msg::TextAnalysisDone {
                        request_id,
                        result: Ok(map_text_report(report)),
                    },
                    (mode, Ok(_)) => {
                        sentinel_warn!(
                            "{:?} analysis request_id={} got a response of the other mode",
                            mode,
                            request_id
                        );
                        failed(mode, request_id)
                    }
                    (mode, Err(err)) => {
                        sentinel_warn!(
                            "{:?} analysis request_id={} failed: {}",
                            mode,
                            request_id,
                            err
                        );
                        failed(mode, request_id)
                    }
                };
                Some(msg)
            }
        }
    }
}

fn failed(mode: Mode, request_id: RequestId) -> Msg {
    match mode {
        Mode::Url => Msg::UrlAnalysisDone {
            request_id,
            result: Err(AnalysisFailed),
        },
        Mode::Text => Msg::TextAnalysisDone {
            request_id,
            result: Err(AnalysisFailed),
        },
    }
}

fn map_url_report(report: UrlReport) -> AnalysisResult {
    AnalysisResult {
        status: UrlStatus::parse(&report.status),
        message: report.message,
        reasons: report.reasons,
        phishing_score: report.phishing_score,
    }
}

fn map_text_report(report: TextReport) -> TextAnalysisResult {
    TextAnalysisResult {
        verdict: TextVerdict::parse(&report.verdict),
        explanation: report.explanation,
    }
}
