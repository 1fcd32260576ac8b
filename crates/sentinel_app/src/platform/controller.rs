use std::thread;
use std::time::Duration;

use sentinel_core::{update, AppState, AppViewModel, Msg};

use super::effects::{AnalysisBackend, EffectRunner};
use super::ui::{render, VerdictView};

/// Drives one request/response cycle per trigger and per mode, and keeps the
/// view port in step with the core state.
///
/// Everything runs on the caller's thread. A trigger is applied to the state
/// (and the trigger disabled on the port) before the request is handed to the
/// backend, so a second trigger for the same mode cannot slip in while the
/// first is in flight.
pub struct VerdictRequestController<B, V> {
    state: AppState,
    runner: EffectRunner<B>,
    view: V,
    rendered: Option<AppViewModel>,
}

impl<B: AnalysisBackend, V: VerdictView> VerdictRequestController<B, V> {
    pub fn new(backend: B, view: V) -> Self {
        let mut controller = Self {
            state: AppState::new(),
            runner: EffectRunner::new(backend),
            view,
            rendered: None,
        };
        controller.render();
        controller
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Releases the view, dropping the backend with the controller.
    pub fn into_view(self) -> V {
        self.view
    }

    pub fn backend(&self) -> &B {
        self.runner.backend()
    }

    pub fn resolve_tab_url(&mut self, url: Option<String>) {
        self.dispatch(Msg::TabUrlResolved(url));
    }

    pub fn begin_url_analysis(&mut self, current_tab_url: &str) {
        self.dispatch(Msg::AnalyzeUrlClicked {
            url: current_tab_url.to_string(),
        });
    }

    pub fn begin_text_analysis(&mut self, text: &str) {
        self.dispatch(Msg::AnalyzeTextClicked {
            text: text.to_string(),
        });
    }

    /// Applies every completion the backend has ready. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let inbox = self.runner.drain();
        let count = inbox.len();
        for msg in inbox {
            self.dispatch(msg);
        }
        count
    }

    /// Blocks until no mode is loading. There is no deadline: a request that
    /// never resolves keeps this waiting.
    pub fn wait_settled(&mut self, poll_interval: Duration) {
        while !self.state.is_settled() {
            if self.pump() == 0 {
                thread::sleep(poll_interval);
            }
        }
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        if was_dirty {
            self.render();
        }
        self.runner.enqueue(effects);
    }

    fn render(&mut self) {
        let next = self.state.view();
        render::render(self.rendered.as_ref(), &next, &mut self.view);
        self.rendered = Some(next);
    }
}
