use crate::{Phase, VisualClass};

/// Status text shown in place of a verdict when a request failed.
pub const ERROR_STATUS_TEXT: &str = "Error";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub tab: TabView,
    pub url: UrlPanelView,
    pub text: TextPanelView,
    pub dirty: bool,
}

/// The active-tab display box at the top of the URL panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabView {
    pub display: String,
    /// Set by the last successful URL verdict; errors leave it untouched.
    pub class: Option<VisualClass>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPanelView {
    pub phase: Phase,
    pub trigger_enabled: bool,
    pub loading: bool,
    pub result: Option<UrlResultView>,
    pub error: Option<ErrorView>,
}

impl Default for UrlPanelView {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            trigger_enabled: true,
            loading: false,
            result: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlResultView {
    pub status_text: String,
    pub message: String,
    /// Rendered as a list only when non-empty.
    pub reasons: Vec<String>,
    pub phishing_score: Option<String>,
    pub class: VisualClass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPanelView {
    pub phase: Phase,
    pub trigger_enabled: bool,
    pub loading: bool,
    pub result: Option<TextResultView>,
    pub error: Option<ErrorView>,
}

impl Default for TextPanelView {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            trigger_enabled: true,
            loading: false,
            result: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextResultView {
    pub status_text: String,
    pub explanation: String,
    pub class: VisualClass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub status_text: &'static str,
    pub message: String,
    pub class: VisualClass,
}

impl ErrorView {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            status_text: ERROR_STATUS_TEXT,
            message: message.to_string(),
            class: VisualClass::Danger,
        }
    }
}
