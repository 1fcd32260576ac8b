use crate::{AnalysisFailed, AnalysisResult, RequestId, TextAnalysisResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The host answered the active-tab query. `None` when the tab URL is not accessible.
    TabUrlResolved(Option<String>),
    /// User pressed the URL analysis trigger.
    AnalyzeUrlClicked { url: String },
    /// User pressed the text analysis trigger with the raw input contents.
    AnalyzeTextClicked { text: String },
    /// Backend completion for a URL request.
    UrlAnalysisDone {
        request_id: RequestId,
        result: Result<AnalysisResult, AnalysisFailed>,
    },
    /// Backend completion for a text request.
    TextAnalysisDone {
        request_id: RequestId,
        result: Result<TextAnalysisResult, AnalysisFailed>,
    },
    /// Render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
