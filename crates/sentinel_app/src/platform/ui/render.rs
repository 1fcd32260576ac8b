use sentinel_core::{AppViewModel, Mode, TextPanelView, UrlPanelView};

use super::VerdictView;

/// Pushes the parts of `next` that differ from `previous` to the port.
/// With no previous view everything is drawn.
pub fn render<V: VerdictView + ?Sized>(
    previous: Option<&AppViewModel>,
    next: &AppViewModel,
    view: &mut V,
) {
    if previous.map(|p| &p.tab) != Some(&next.tab) {
        view.show_current_url(&next.tab);
    }
    if previous.map(|p| &p.url) != Some(&next.url) {
        render_url_panel(&next.url, view);
    }
    if previous.map(|p| &p.text) != Some(&next.text) {
        render_text_panel(&next.text, view);
    }
}

fn render_url_panel<V: VerdictView + ?Sized>(panel: &UrlPanelView, view: &mut V) {
    view.set_loading(Mode::Url, panel.loading);
    match (&panel.result, &panel.error) {
        (Some(result), _) => view.show_url_result(result),
        (None, Some(error)) => view.show_error(Mode::Url, error),
        (None, None) => view.hide_result(Mode::Url),
    }
}

fn render_text_panel<V: VerdictView + ?Sized>(panel: &TextPanelView, view: &mut V) {
    view.set_loading(Mode::Text, panel.loading);
    match (&panel.result, &panel.error) {
        (Some(result), _) => view.show_text_result(result),
        (None, Some(error)) => view.show_error(Mode::Text, error),
        (None, None) => view.hide_result(Mode::Text),
    }
}
