use std::io::{self, Read, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use sentinel_core::{
    normalize_login_email, reply, signed_in_label, Mode, Phase, CHAT_GREETING,
};
use sentinel_engine::EngineHandle;
use sentinel_logging::sentinel_debug;

use super::cli::{Cli, Command};
use super::config::AppConfig;
use super::controller::VerdictRequestController;
use super::logging;
use super::persistence::{load_remembered_email, save_remembered_email};
use super::ui::TerminalView;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Exit status when the verdict request itself failed.
const EXIT_REQUEST_FAILED: u8 = 2;

pub fn run_app() -> anyhow::Result<ExitCode> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    logging::initialize(
        config.log_destination,
        logging::level_for_verbosity(cli.verbose),
    );
    sentinel_debug!("Configuration: {:?}", config);

    match cli.command {
        Command::Url { url } => analyze_url(&config, url),
        Command::Text { text } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin().context("reading text from stdin")?,
            };
            analyze_text(&config, &text)
        }
        Command::Chat { message } => {
            let message = message.join(" ");
            let mut out = io::stdout().lock();
            if message.trim().is_empty() {
                writeln!(out, "{CHAT_GREETING}")?;
            } else {
                writeln!(out, "{}", reply(&message))?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Login { email } => {
            let email = normalize_login_email(&email);
            save_remembered_email(&config.state_dir(), &email)
                .context("remembering login")?;
            writeln!(io::stdout().lock(), "{}", signed_in_label(Some(&email)))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Whoami => {
            let email = load_remembered_email(&config.state_dir());
            writeln!(io::stdout().lock(), "{}", signed_in_label(email.as_deref()))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn analyze_url(config: &AppConfig, url: Option<String>) -> anyhow::Result<ExitCode> {
    let mut controller = start_controller(config)?;
    let current = url.clone().unwrap_or_default();
    controller.resolve_tab_url(url);
    controller.begin_url_analysis(&current);
    controller.wait_settled(POLL_INTERVAL);
    Ok(exit_code(controller.state().phase(Mode::Url)))
}

fn analyze_text(config: &AppConfig, text: &str) -> anyhow::Result<ExitCode> {
    let mut controller = start_controller(config)?;
    controller.begin_text_analysis(text);
    controller.wait_settled(POLL_INTERVAL);
    Ok(exit_code(controller.state().phase(Mode::Text)))
}

fn start_controller(
    config: &AppConfig,
) -> anyhow::Result<VerdictRequestController<EngineHandle, TerminalView<io::Stdout>>> {
    let engine =
        EngineHandle::new(config.client_settings()).context("starting analysis engine")?;
    Ok(VerdictRequestController::new(
        engine,
        TerminalView::new(io::stdout()),
    ))
}

fn read_stdin() -> io::Result<String> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

fn exit_code(phase: Phase) -> ExitCode {
    match phase {
        Phase::Errored => ExitCode::from(EXIT_REQUEST_FAILED),
        Phase::Idle | Phase::Loading | Phase::Shown => ExitCode::SUCCESS,
    }
}
