//! Sentinel core: pure verdict state machine and view-model helpers.
mod account;
mod chatbot;
mod display;
mod effect;
mod msg;
mod state;
mod update;
mod verdict;
mod view_model;

pub use account::{normalize_login_email, signed_in_label, NOT_SIGNED_IN_LABEL};
pub use chatbot::{reply, CHAT_GREETING, DEFAULT_REPLY};
pub use display::{display_host, NO_HOST_LABEL, NO_TAB_URL_LABEL};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, Phase, RequestId, RequestState};
pub use update::update;
pub use verdict::{
    AnalysisFailed, AnalysisResult, Mode, TextAnalysisResult, TextVerdict, UrlStatus,
    VisualClass, TEXT_FAILURE_MESSAGE, URL_FAILURE_MESSAGE,
};
pub use view_model::{
    AppViewModel, ErrorView, TabView, TextPanelView, TextResultView, UrlPanelView, UrlResultView,
    ERROR_STATUS_TEXT,
};
