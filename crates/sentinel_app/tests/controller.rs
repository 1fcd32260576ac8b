use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::sync::Once;
use std::time::Duration;

use pretty_assertions::assert_eq;
use sentinel_app::platform::{AnalysisBackend, VerdictRequestController, VerdictView};
use sentinel_core::{
    ErrorView, Mode, Phase, RequestId, TabView, TextResultView, UrlResultView, VisualClass,
    TEXT_FAILURE_MESSAGE, URL_FAILURE_MESSAGE,
};
use sentinel_engine::{
    AnalysisError, AnalysisRequest, AnalysisResponse, EngineError, EngineEvent, FailureKind,
    TextReport, UrlReport,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(sentinel_logging::initialize_for_tests);
}

/// Records submissions; completions are queued by the test.
#[derive(Default)]
struct FakeBackend {
    submitted: RefCell<Vec<(RequestId, AnalysisRequest)>>,
    ready: RefCell<VecDeque<EngineEvent>>,
    stopped: Cell<bool>,
}

impl FakeBackend {
    fn submitted(&self) -> Vec<(RequestId, AnalysisRequest)> {
        self.submitted.borrow().clone()
    }

    fn complete(&self, request_id: RequestId, result: Result<AnalysisResponse, AnalysisError>) {
        self.ready
            .borrow_mut()
            .push_back(EngineEvent::Completed { request_id, result });
    }
}

impl AnalysisBackend for FakeBackend {
    fn submit(&self, request_id: RequestId, request: AnalysisRequest) -> Result<(), EngineError> {
        if self.stopped.get() {
            return Err(EngineError::Stopped);
        }
        self.submitted.borrow_mut().push((request_id, request));
        Ok(())
    }

    fn try_recv(&self) -> Option<EngineEvent> {
        self.ready.borrow_mut().pop_front()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ViewCall {
    CurrentUrl(TabView),
    Loading(Mode, bool),
    Hide(Mode),
    UrlResult(UrlResultView),
    TextResult(TextResultView),
    Error(Mode, ErrorView),
}

#[derive(Default)]
struct RecordingView {
    calls: Vec<ViewCall>,
}

impl RecordingView {
    fn take(&mut self) -> Vec<ViewCall> {
        std::mem::take(&mut self.calls)
    }
}

impl VerdictView for RecordingView {
    fn show_current_url(&mut self, tab: &TabView) {
        self.calls.push(ViewCall::CurrentUrl(tab.clone()));
    }

    fn set_loading(&mut self, mode: Mode, loading: bool) {
        self.calls.push(ViewCall::Loading(mode, loading));
    }

    fn hide_result(&mut self, mode: Mode) {
        self.calls.push(ViewCall::Hide(mode));
    }

    fn show_url_result(&mut self, result: &UrlResultView) {
        self.calls.push(ViewCall::UrlResult(result.clone()));
    }

    fn show_text_result(&mut self, result: &TextResultView) {
        self.calls.push(ViewCall::TextResult(result.clone()));
    }

    fn show_error(&mut self, mode: Mode, error: &ErrorView) {
        self.calls.push(ViewCall::Error(mode, error.clone()));
    }
}

type Controller = VerdictRequestController<FakeBackend, RecordingView>;

fn controller() -> Controller {
    init_logging();
    let mut controller =
        VerdictRequestController::new(FakeBackend::default(), RecordingView::default());
    controller.view_mut().take();
    controller
}

fn failure(kind: FailureKind) -> Result<AnalysisResponse, AnalysisError> {
    Err(AnalysisError {
        kind,
        message: "simulated".to_string(),
    })
}

#[test]
fn initial_render_draws_both_panels_idle() {
    init_logging();
    let mut controller =
        VerdictRequestController::new(FakeBackend::default(), RecordingView::default());
    assert_eq!(
        controller.view_mut().take(),
        vec![
            ViewCall::CurrentUrl(TabView::default()),
            ViewCall::Loading(Mode::Url, false),
            ViewCall::Hide(Mode::Url),
            ViewCall::Loading(Mode::Text, false),
            ViewCall::Hide(Mode::Text),
        ]
    );
}

#[test]
fn url_trigger_disables_before_submitting() {
    let mut controller = controller();
    controller.begin_url_analysis("http://example.com");

    assert_eq!(
        controller.view_mut().take(),
        vec![ViewCall::Loading(Mode::Url, true), ViewCall::Hide(Mode::Url)]
    );
    assert_eq!(
        controller.backend().submitted(),
        vec![(1, AnalysisRequest::url("http://example.com"))]
    );
    assert_eq!(controller.state().phase(Mode::Url), Phase::Loading);
}

#[test]
fn rapid_double_url_trigger_sends_one_request() {
    let mut controller = controller();
    controller.begin_url_analysis("http://example.com");
    controller.begin_url_analysis("http://example.com");

    assert_eq!(controller.backend().submitted().len(), 1);
    let calls = controller.view_mut().take();
    assert_eq!(
        calls
            .iter()
            .filter(|call| **call == ViewCall::Loading(Mode::Url, true))
            .count(),
        1
    );
}

#[test]
fn non_empty_text_issues_one_request_with_exact_body() {
    let mut controller = controller();
    controller.begin_text_analysis("  click here now  ");

    assert_eq!(
        controller.backend().submitted(),
        vec![(1, AnalysisRequest::text("  click here now  "))]
    );
}

#[test]
fn empty_text_issues_nothing_and_draws_nothing() {
    let mut controller = controller();
    controller.begin_text_analysis("");

    assert!(controller.backend().submitted().is_empty());
    assert_eq!(controller.state().phase(Mode::Text), Phase::Idle);
    assert!(controller.view_mut().take().is_empty());
}

#[test]
fn legitimate_url_scenario() {
    let mut controller = controller();
    controller.resolve_tab_url(Some("http://example.com".to_string()));
    controller.begin_url_analysis("http://example.com");
    controller.view_mut().take();

    controller.backend().complete(
        1,
        Ok(AnalysisResponse::Url(UrlReport {
            status: "Legitimate".to_string(),
            message: "No threats found".to_string(),
            reasons: Vec::new(),
            phishing_score: None,
        })),
    );
    assert_eq!(controller.pump(), 1);

    assert_eq!(
        controller.view_mut().take(),
        vec![
            ViewCall::CurrentUrl(TabView {
                display: "example.com".to_string(),
                class: Some(VisualClass::Safe),
            }),
            ViewCall::Loading(Mode::Url, false),
            ViewCall::UrlResult(UrlResultView {
                status_text: "Legitimate".to_string(),
                message: "No threats found".to_string(),
                reasons: Vec::new(),
                phishing_score: None,
                class: VisualClass::Safe,
            }),
        ]
    );
    assert_eq!(controller.state().phase(Mode::Url), Phase::Shown);
    assert!(controller.state().is_settled());
}

#[test]
fn high_risk_text_scenario() {
    let mut controller = controller();
    controller.begin_text_analysis("click here now");
    controller.view_mut().take();

    controller.backend().complete(
        1,
        Ok(AnalysisResponse::Text(TextReport {
            verdict: "High Risk".to_string(),
            explanation: "Urgency language detected".to_string(),
        })),
    );
    controller.pump();

    assert_eq!(
        controller.view_mut().take(),
        vec![
            ViewCall::Loading(Mode::Text, false),
            ViewCall::TextResult(TextResultView {
                status_text: "High Risk".to_string(),
                explanation: "Urgency language detected".to_string(),
                class: VisualClass::Danger,
            }),
        ]
    );
}

#[test]
fn http_500_errors_and_reenables_trigger() {
    let mut controller = controller();
    controller.begin_url_analysis("http://example.com");
    controller.view_mut().take();

    controller
        .backend()
        .complete(1, failure(FailureKind::HttpStatus(500)));
    controller.pump();

    assert_eq!(controller.state().phase(Mode::Url), Phase::Errored);
    assert_eq!(
        controller.view_mut().take(),
        vec![
            ViewCall::Loading(Mode::Url, false),
            ViewCall::Error(
                Mode::Url,
                ErrorView {
                    status_text: "Error",
                    message: URL_FAILURE_MESSAGE.to_string(),
                    class: VisualClass::Danger,
                }
            ),
        ]
    );
}

#[test]
fn network_failure_errors_text_mode() {
    let mut controller = controller();
    controller.begin_text_analysis("hello");
    controller.view_mut().take();

    controller.backend().complete(1, failure(FailureKind::Network));
    controller.pump();

    assert_eq!(controller.state().phase(Mode::Text), Phase::Errored);
    assert_eq!(
        controller.state().text_request().last_error(),
        Some(TEXT_FAILURE_MESSAGE)
    );
    let calls = controller.view_mut().take();
    assert_eq!(calls[0], ViewCall::Loading(Mode::Text, false));
}

#[test]
fn malformed_response_takes_the_failure_path() {
    let mut controller = controller();
    controller.begin_url_analysis("http://example.com");
    controller
        .backend()
        .complete(1, failure(FailureKind::MalformedResponse));
    controller.pump();

    assert_eq!(controller.state().phase(Mode::Url), Phase::Errored);
}

#[test]
fn refused_submit_settles_as_failure() {
    let mut controller = controller();
    controller.backend().stopped.set(true);
    controller.begin_text_analysis("hello");
    assert!(controller.backend().submitted().is_empty());
    assert_eq!(controller.state().phase(Mode::Text), Phase::Loading);
    controller.view_mut().take();

    controller.wait_settled(Duration::from_millis(1));

    assert_eq!(controller.state().phase(Mode::Text), Phase::Errored);
    assert_eq!(
        controller.view_mut().take(),
        vec![
            ViewCall::Loading(Mode::Text, false),
            ViewCall::Error(
                Mode::Text,
                ErrorView {
                    status_text: "Error",
                    message: TEXT_FAILURE_MESSAGE.to_string(),
                    class: VisualClass::Danger,
                }
            ),
        ]
    );

    controller.backend().stopped.set(false);
    controller.begin_text_analysis("hello");
    assert_eq!(controller.backend().submitted().len(), 1);
}

#[test]
fn trigger_works_again_after_failure() {
    let mut controller = controller();
    controller.begin_url_analysis("http://example.com");
    controller.backend().complete(1, failure(FailureKind::Network));
    controller.pump();

    controller.begin_url_analysis("http://example.com");
    assert_eq!(controller.backend().submitted().len(), 2);
    assert_eq!(controller.state().phase(Mode::Url), Phase::Loading);
}

#[test]
fn unknown_completion_is_ignored() {
    let mut controller = controller();
    controller
        .backend()
        .complete(42, Ok(AnalysisResponse::Text(TextReport::default())));

    assert_eq!(controller.pump(), 0);
    assert!(controller.view_mut().take().is_empty());
    assert!(controller.state().is_settled());
}

#[test]
fn wait_settled_returns_once_completion_arrives() {
    let mut controller = controller();
    controller.begin_text_analysis("hello");
    controller.backend().complete(
        1,
        Ok(AnalysisResponse::Text(TextReport {
            verdict: "Safe".to_string(),
            explanation: "Nothing unusual".to_string(),
        })),
    );

    controller.wait_settled(Duration::from_millis(1));
    assert_eq!(controller.state().phase(Mode::Text), Phase::Shown);
}
