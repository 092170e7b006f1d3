mod api;
mod cli_messages;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod params;
mod session;
mod ui;
mod view;
mod workers;

use crate::config::{Config, get_config_path};
use crate::environment::Environment;
use crate::params::{AnalysisInputs, parse_list};
use crate::session::{HeadlessJob, run_headless_mode, run_tui_mode, setup_session};
use crate::ui::UIConfig;
use crate::view::{AnalysisKind, ResponsePolicy};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::Path;

/// Environment variable holding the backend base URL.
const API_URL_VAR: &str = "QRPO_API_URL";
/// Older name, accepts `local` or a URL.
const ENVIRONMENT_VAR: &str = "QRPO_ENVIRONMENT";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Backend base URL, e.g. http://127.0.0.1:8000. Overrides QRPO_API_URL and the config file.
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the interactive dashboard
    Start {
        /// Drop responses that arrive after a newer request of the same kind
        #[arg(long, default_value_t = false)]
        discard_stale: bool,

        /// Disable background colors
        #[arg(long, default_value_t = false)]
        no_background: bool,
    },
    /// Check that the backend is reachable
    Health,
    /// FFT band-energy features of a price series
    Fft {
        /// Comma-separated price series; defaults to a synthetic series
        #[arg(long, value_name = "VALUES")]
        series: Option<String>,
    },
    /// Mean-variance allocation of the demo portfolio
    Classical {
        /// Risk aversion
        #[arg(long)]
        lam: Option<f64>,
    },
    /// QAOA asset selection of the demo portfolio
    Quantum {
        /// Risk aversion
        #[arg(long)]
        lam: Option<f64>,

        /// Number of QAOA layers
        #[arg(long)]
        reps: Option<u32>,
    },
    /// Stock prediction for one ticker
    Stock {
        #[arg(long)]
        ticker: Option<String>,

        /// History window, e.g. 6mo or 1y
        #[arg(long)]
        period: Option<String>,
    },
    /// Historical simulation of a weighted portfolio
    Simulate {
        /// Comma-separated tickers
        #[arg(long, value_name = "TICKERS")]
        tickers: Option<String>,

        /// Comma-separated weights; equal weights when omitted
        #[arg(long, value_name = "WEIGHTS")]
        weights: Option<String>,
    },
    /// Ask the assistant a question
    Chat {
        #[arg(long)]
        message: String,
    },
    /// Manage the stored configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Store the backend base URL
    SetUrl {
        /// Base URL of the backend
        url: String,
    },
    /// Print the stored configuration
    Show,
    /// Delete the configuration file
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init_max_level();

    let args = Args::parse();
    let config_path = get_config_path()?;

    // The stored config is only read for backend commands, so a broken file
    // can still be fixed with `config set-url` or `config clear`.
    let context = || load_context(args.api_url.as_deref(), &config_path);

    match args.command {
        Command::Start {
            discard_stale,
            no_background,
        } => {
            let (environment, inputs) = context()?;
            let session = setup_session(environment)?;
            let ui_config = UIConfig {
                with_background_color: !no_background,
                response_policy: if discard_stale {
                    ResponsePolicy::DiscardStale
                } else {
                    ResponsePolicy::LastWriteWins
                },
                inputs,
            };
            run_tui_mode(session, ui_config).await
        }
        Command::Health => {
            let (environment, inputs) = context()?;
            run_headless(environment, HeadlessJob::Health, inputs).await
        }
        Command::Fft { series } => {
            let (environment, inputs) = context()?;
            let inputs = match series {
                Some(series) => inputs.with_series(parse_list(&series)?)?,
                None => inputs,
            };
            run_headless(environment, HeadlessJob::Run(AnalysisKind::Signals), inputs).await
        }
        Command::Classical { lam } => {
            let (environment, mut inputs) = context()?;
            if let Some(lam) = lam {
                inputs.lam = lam;
            }
            run_headless(environment, HeadlessJob::Run(AnalysisKind::Classical), inputs).await
        }
        Command::Quantum { lam, reps } => {
            let (environment, mut inputs) = context()?;
            if let Some(lam) = lam {
                inputs.lam = lam;
            }
            if let Some(reps) = reps {
                inputs.reps = reps;
            }
            run_headless(environment, HeadlessJob::Run(AnalysisKind::Quantum), inputs).await
        }
        Command::Stock { ticker, period } => {
            let (environment, mut inputs) = context()?;
            if let Some(ticker) = ticker {
                inputs.ticker = ticker.to_uppercase();
            }
            if let Some(period) = period {
                inputs.period = period;
            }
            run_headless(environment, HeadlessJob::Run(AnalysisKind::Stock), inputs).await
        }
        Command::Simulate { tickers, weights } => {
            let (environment, inputs) = context()?;
            let weights = weights.map(|w| parse_list::<f64>(&w)).transpose()?;
            let inputs = match tickers {
                Some(tickers) => inputs.with_portfolio(parse_list(&tickers)?, weights)?,
                None if weights.is_some() => {
                    let tickers = inputs.tickers.clone();
                    inputs.with_portfolio(tickers, weights)?
                }
                None => inputs,
            };
            run_headless(environment, HeadlessJob::Run(AnalysisKind::Simulation), inputs).await
        }
        Command::Chat { message } => {
            let (environment, inputs) = context()?;
            run_headless(environment, HeadlessJob::Chat(message), inputs).await
        }
        Command::Config { action } => run_config_command(action, &config_path),
    }
}

/// Resolves the backend and the analysis inputs from flag, environment and config file.
fn load_context(
    api_url: Option<&str>,
    config_path: &Path,
) -> Result<(Environment, AnalysisInputs), Box<dyn Error>> {
    let config = Config::load_or_default(config_path)
        .map_err(|e| format!("Failed to load config {}: {}", config_path.display(), e))?;
    let env_url = std::env::var(API_URL_VAR)
        .or_else(|_| std::env::var(ENVIRONMENT_VAR))
        .ok();
    let environment = Environment::resolve(api_url, env_url.as_deref(), config.api_url.as_deref())?;
    Ok((environment, AnalysisInputs::from_config(&config)))
}

async fn run_headless(
    environment: Environment,
    job: HeadlessJob,
    inputs: AnalysisInputs,
) -> Result<(), Box<dyn Error>> {
    let session = setup_session(environment)?;
    run_headless_mode(session, job, inputs).await
}

fn run_config_command(action: ConfigAction, config_path: &Path) -> Result<(), Box<dyn Error>> {
    match action {
        ConfigAction::SetUrl { url } => {
            let environment: Environment = url
                .parse()
                .map_err(|_| format!("Invalid backend URL: {}", url))?;
            let config = if config_path.exists() {
                let mut config = Config::load_from_file(config_path)?;
                config.api_url = Some(environment.api_url());
                config
            } else {
                Config::with_api_url(environment.api_url())
            };
            config
                .save(config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!(
                "Backend URL saved",
                "{} -> {}",
                environment.api_url(),
                config_path.display()
            );
            Ok(())
        }
        ConfigAction::Show => {
            if !config_path.exists() {
                print_cmd_warn!("No config file", "using built-in defaults");
            }
            let config = Config::load_or_default(config_path)?;
            print_cmd_info!("Config file", "{}", config_path.display());
            cli_messages::print_payload(&config)?;
            Ok(())
        }
        ConfigAction::Clear => {
            println!("Clearing configuration file...");
            Config::clear(config_path).map_err(Into::into)
        }
    }
}
