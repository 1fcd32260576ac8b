use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "sentinel",
    version,
    about = "Ask an Aura Sentinel analysis server whether a URL or a message looks like phishing"
)]
pub struct Cli {
    /// RON configuration file (defaults to ./sentinel.ron when present).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base URL of the analysis server, overriding the configuration.
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a URL, as the extension does for the active tab.
    Url {
        /// URL to analyze. When omitted the server is still asked, with an empty URL.
        url: Option<String>,
    },
    /// Analyze a message for scam language.
    Text {
        /// Text to analyze. Read from stdin when omitted.
        text: Option<String>,
    },
    /// Ask the help bot a question. Prints the greeting when no message is given.
    Chat { message: Vec<String> },
    /// Remember an email for the demo sign-in.
    Login { email: String },
    /// Show who is signed in.
    Whoami,
}
