//! Presentation side of the controller: the port it renders through, the
//! view-model diffing that drives the port, and a terminal implementation.
pub mod render;
mod terminal;

pub use terminal::TerminalView;

use sentinel_core::{ErrorView, Mode, TabView, TextResultView, UrlResultView};

/// UI handles the controller renders into. Implementations only draw; they
/// never change request state.
pub trait VerdictView {
    fn show_current_url(&mut self, tab: &TabView);
    /// `true` disables the mode's trigger and shows its loading indicator;
    /// `false` re-enables the trigger and hides the indicator.
    fn set_loading(&mut self, mode: Mode, loading: bool);
    fn hide_result(&mut self, mode: Mode);
    fn show_url_result(&mut self, result: &UrlResultView);
    fn show_text_result(&mut self, result: &TextResultView);
    fn show_error(&mut self, mode: Mode, error: &ErrorView);
}
