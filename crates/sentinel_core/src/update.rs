use crate::{
    AnalysisFailed, AppState, Effect, Mode, Msg, TEXT_FAILURE_MESSAGE, URL_FAILURE_MESSAGE,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// A trigger for a mode that is already `Loading` is dropped here, before any
/// effect exists, so at most one request per mode can be in flight.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TabUrlResolved(url) => {
            state.set_tab_url(url);
            Vec::new()
        }
        Msg::AnalyzeUrlClicked { url } => match state.begin(Mode::Url) {
            // The tab URL is forwarded as-is, even when empty.
            Some(request_id) => vec![Effect::SubmitUrl { request_id, url }],
            None => Vec::new(),
        },
        Msg::AnalyzeTextClicked { text } => {
            // Untrimmed on purpose: only the literal empty string is rejected.
            if text.is_empty() {
                return (state, Vec::new());
            }
            match state.begin(Mode::Text) {
                Some(request_id) => vec![Effect::SubmitText { request_id, text }],
                None => Vec::new(),
            }
        }
        Msg::UrlAnalysisDone { request_id, result } => {
            match result {
                Ok(result) => state.url_succeeded(request_id, result),
                Err(AnalysisFailed) => state.failed(Mode::Url, request_id, URL_FAILURE_MESSAGE),
            }
            Vec::new()
        }
        Msg::TextAnalysisDone { request_id, result } => {
            match result {
                Ok(result) => state.text_succeeded(request_id, result),
                Err(AnalysisFailed) => state.failed(Mode::Text, request_id, TEXT_FAILURE_MESSAGE),
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
