pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
pub mod effects;
pub mod logging;
pub mod persistence;
pub mod ui;

pub use app::{run, run_app};
pub use config::{AppConfig, ConfigError};
pub use controller::VerdictRequestController;
pub use effects::{AnalysisBackend, EffectRunner};
pub use ui::{TerminalView, VerdictView};
