use crate::view_model::{
    AppViewModel, ErrorView, TabView, TextPanelView, TextResultView, UrlPanelView, UrlResultView,
};
use crate::{display_host, AnalysisResult, Mode, TextAnalysisResult, VisualClass};

pub type RequestId = u64;

/// Local UI phase of one request/response cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Shown,
    Errored,
}

/// Per-mode request state. Only the update function moves `phase`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestState<R> {
    phase: Phase,
    pending: Option<RequestId>,
    last_result: Option<R>,
    last_error: Option<String>,
}

impl<R> Default for RequestState<R> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            pending: None,
            last_result: None,
            last_error: None,
        }
    }
}

impl<R> RequestState<R> {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The request currently in flight, if any.
    pub fn pending(&self) -> Option<RequestId> {
        self.pending
    }

    pub fn last_result(&self) -> Option<&R> {
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    fn begin(&mut self, request_id: RequestId) {
        self.phase = Phase::Loading;
        self.pending = Some(request_id);
        self.last_result = None;
        self.last_error = None;
    }

    fn succeed(&mut self, request_id: RequestId, result: R) -> bool {
        if self.pending != Some(request_id) {
            return false;
        }
        self.phase = Phase::Shown;
        self.pending = None;
        self.last_result = Some(result);
        true
    }

    fn fail(&mut self, request_id: RequestId, message: &str) -> bool {
        if self.pending != Some(request_id) {
            return false;
        }
        self.phase = Phase::Errored;
        self.pending = None;
        self.last_error = Some(message.to_string());
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    url: RequestState<AnalysisResult>,
    text: RequestState<TextAnalysisResult>,
    tab_url: Option<String>,
    tab_display: String,
    tab_class: Option<VisualClass>,
    last_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url_request(&self) -> &RequestState<AnalysisResult> {
        &self.url
    }

    pub fn text_request(&self) -> &RequestState<TextAnalysisResult> {
        &self.text
    }

    pub fn phase(&self, mode: Mode) -> Phase {
        match mode {
            Mode::Url => self.url.phase,
            Mode::Text => self.text.phase,
        }
    }

    /// URL reported by the host for the active tab.
    pub fn tab_url(&self) -> Option<&str> {
        self.tab_url.as_deref()
    }

    /// True when neither mode has a request in flight.
    pub fn is_settled(&self) -> bool {
        !self.url.is_loading() && !self.text.is_loading()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            tab: TabView {
                display: self.tab_display.clone(),
                class: self.tab_class,
            },
            url: self.url_panel(),
            text: self.text_panel(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_tab_url(&mut self, url: Option<String>) {
        self.tab_display = display_host(url.as_deref());
        self.tab_url = url;
        self.mark_dirty();
    }

    /// Moves `mode` to `Loading` under a fresh request id. Returns `None` while a
    /// request for that mode is already in flight.
    pub(crate) fn begin(&mut self, mode: Mode) -> Option<RequestId> {
        let busy = match mode {
            Mode::Url => self.url.is_loading(),
            Mode::Text => self.text.is_loading(),
        };
        if busy {
            return None;
        }
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        match mode {
            Mode::Url => self.url.begin(request_id),
            Mode::Text => self.text.begin(request_id),
        }
        self.mark_dirty();
        Some(request_id)
    }

    pub(crate) fn url_succeeded(&mut self, request_id: RequestId, result: AnalysisResult) {
        let class = result.status.visual_class();
        if self.url.succeed(request_id, result) {
            self.tab_class = Some(class);
            self.mark_dirty();
        }
    }

    pub(crate) fn text_succeeded(&mut self, request_id: RequestId, result: TextAnalysisResult) {
        if self.text.succeed(request_id, result) {
            self.mark_dirty();
        }
    }

    pub(crate) fn failed(&mut self, mode: Mode, request_id: RequestId, message: &str) {
        let changed = match mode {
            Mode::Url => self.url.fail(request_id, message),
            Mode::Text => self.text.fail(request_id, message),
        };
        if changed {
            self.mark_dirty();
        }
    }

    fn url_panel(&self) -> UrlPanelView {
        let phase = self.url.phase;
        let result = match (phase, &self.url.last_result) {
            (Phase::Shown, Some(result)) => Some(UrlResultView {
                status_text: result.status.as_str().to_string(),
                message: result.message.clone(),
                reasons: result.reasons.clone(),
                phishing_score: result.phishing_score.clone(),
                class: result.status.visual_class(),
            }),
            _ => None,
        };
        UrlPanelView {
            phase,
            trigger_enabled: phase != Phase::Loading,
            loading: phase == Phase::Loading,
            result,
            error: error_view(phase, self.url.last_error.as_deref()),
        }
    }

    fn text_panel(&self) -> TextPanelView {
        let phase = self.text.phase;
        let result = match (phase, &self.text.last_result) {
            (Phase::Shown, Some(result)) => Some(TextResultView {
                status_text: result.verdict.as_str().to_string(),
                explanation: result.explanation.clone(),
                class: result.verdict.visual_class(),
            }),
            _ => None,
        };
        TextPanelView {
            phase,
            trigger_enabled: phase != Phase::Loading,
            loading: phase == Phase::Loading,
            result,
            error: error_view(phase, self.text.last_error.as_deref()),
        }
    }
}

fn error_view(phase: Phase, message: Option<&str>) -> Option<ErrorView> {
    match (phase, message) {
        (Phase::Errored, Some(message)) => Some(ErrorView::new(message)),
        _ => None,
    }
}
