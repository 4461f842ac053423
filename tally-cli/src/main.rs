use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tally_core::{Reply, Session};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod chat;
mod config;
mod period;
mod render;
mod slash;
mod state;
mod transcript;

use chat::ChatApp;
use period::PeriodSource;
use transcript::Transcript;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TALLY_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "tally", version = VERSION, about = "Chat-style monthly budget assistant")]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive budget chat
    Chat {
        /// Record every submission under this period (YYYY-MM or "March 2024")
        #[arg(long)]
        period: Option<String>,

        /// Line-by-line stdin/stdout instead of the full-screen UI
        #[arg(long, default_value_t = false)]
        plain: bool,
    },

    /// Evaluate a single statement and exit
    Summarize {
        /// e.g. "income=50,000, food=18,000, rent=15000"
        text: String,

        /// Period label for the summary (default: current month)
        #[arg(long)]
        period: Option<String>,

        /// Print the reply as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Manage ~/.tally/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let tui = matches!(cli.command, Command::Chat { plain: false, .. });
    init_logging(cli.verbose, tui)?;

    match cli.command {
        Command::Chat { period, plain } => {
            let cfg = config::load_config()?;
            let period = PeriodSource::new(period.as_deref(), &cfg.chat.timezone)?;
            let transcript = Transcript::open(cfg.chat.transcript)?;
            let app = ChatApp::new(&cfg, period, transcript);
            tracing::info!(plain, "starting chat");
            if plain {
                chat::run_plain(app)?;
            } else {
                chat::run_chat(app)?;
            }
        }

        Command::Summarize { text, period, json } => {
            let cfg = config::load_config()?;
            let label = PeriodSource::new(period.as_deref(), &cfg.chat.timezone)?.label()?;
            let mut session = Session::new(cfg.evaluator());
            let reply = session.submit(&text, &label);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&reply).context("serialize reply")?
                );
            } else {
                println!("{}", reply.text());
                if let Reply::Summary { evaluation } = &reply {
                    println!();
                    if let Some(chart) = &evaluation.chart {
                        println!("{}", render::text_chart(chart));
                    }
                    if let Some(notice) = evaluation.chart_notice() {
                        println!("{notice}");
                    }
                }
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

/// RUST_LOG > --verbose (debug) > warn. The full-screen chat logs to
/// ~/.tally/tally.log; everything else logs to stderr.
fn init_logging(verbose: bool, to_file: bool) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = state::log_path()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}
