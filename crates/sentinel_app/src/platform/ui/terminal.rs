use std::io::Write;

use sentinel_core::{ErrorView, Mode, TabView, TextResultView, UrlResultView, VisualClass};
use sentinel_logging::sentinel_warn;

use super::VerdictView;

/// Prints verdicts as plain lines. The visual class becomes a `[safe]` or
/// `[danger]` tag after the status.
pub struct TerminalView<W: Write> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}") {
            sentinel_warn!("Failed to write to terminal: {}", err);
        }
    }
}

impl<W: Write> VerdictView for TerminalView<W> {
    fn show_current_url(&mut self, tab: &TabView) {
        if tab.display.is_empty() {
            return;
        }
        let text = match tab.class {
            Some(class) => format!("Site: {} [{}]", tab.display, class_tag(class)),
            None => format!("Site: {}", tab.display),
        };
        self.line(&text);
    }

    fn set_loading(&mut self, mode: Mode, loading: bool) {
        if !loading {
            return;
        }
        match mode {
            Mode::Url => self.line("Analyzing URL..."),
            Mode::Text => self.line("Analyzing text..."),
        }
    }

    fn hide_result(&mut self, _mode: Mode) {}

    fn show_url_result(&mut self, result: &UrlResultView) {
        self.line(&format!(
            "Status: {} [{}]",
            result.status_text,
            class_tag(result.class)
        ));
        self.line(&format!("Message: {}", result.message));
        if let Some(score) = &result.phishing_score {
            self.line(&format!("Risk score: {score}"));
        }
        if !result.reasons.is_empty() {
            self.line("Reasons:");
            for reason in &result.reasons {
                self.line(&format!("  - {reason}"));
            }
        }
    }

    fn show_text_result(&mut self, result: &TextResultView) {
        self.line(&format!(
            "Verdict: {} [{}]",
            result.status_text,
            class_tag(result.class)
        ));
        self.line(&format!("Explanation: {}", result.explanation));
    }

    fn show_error(&mut self, mode: Mode, error: &ErrorView) {
        let (status_label, body_label) = match mode {
            Mode::Url => ("Status", "Message"),
            Mode::Text => ("Verdict", "Explanation"),
        };
        self.line(&format!(
            "{status_label}: {} [{}]",
            error.status_text,
            class_tag(error.class)
        ));
        self.line(&format!("{body_label}: {}", error.message));
    }
}

fn class_tag(class: VisualClass) -> &'static str {
    match class {
        VisualClass::Safe => "safe",
        VisualClass::Danger => "danger",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printed(render: impl FnOnce(&mut TerminalView<Vec<u8>>)) -> String {
        let mut view = TerminalView::new(Vec::new());
        render(&mut view);
        String::from_utf8(view.into_inner()).unwrap()
    }

    #[test]
    fn url_result_without_reasons_has_no_list() {
        let out = printed(|view| {
            view.show_url_result(&UrlResultView {
                status_text: "Legitimate".to_string(),
                message: "No threats found".to_string(),
                reasons: Vec::new(),
                phishing_score: None,
                class: VisualClass::Safe,
            })
        });
        assert_eq!(out, "Status: Legitimate [safe]\nMessage: No threats found\n");
    }

    #[test]
    fn url_result_lists_reasons_in_order() {
        let out = printed(|view| {
            view.show_url_result(&UrlResultView {
                status_text: "Phishing".to_string(),
                message: "Risky".to_string(),
                reasons: vec!["first".to_string(), "second".to_string()],
                phishing_score: Some("85".to_string()),
                class: VisualClass::Danger,
            })
        });
        assert_eq!(
            out,
            "Status: Phishing [danger]\nMessage: Risky\nRisk score: 85\nReasons:\n  - first\n  - second\n"
        );
    }

    #[test]
    fn text_error_uses_verdict_labels() {
        let out = printed(|view| {
            view.show_error(
                Mode::Text,
                &ErrorView {
                    status_text: "Error",
                    message: "down".to_string(),
                    class: VisualClass::Danger,
                },
            )
        });
        assert_eq!(out, "Verdict: Error [danger]\nExplanation: down\n");
    }

    #[test]
    fn empty_tab_display_prints_nothing() {
        let out = printed(|view| view.show_current_url(&TabView::default()));
        assert!(out.is_empty());
    }
}
