//! Signal > Noise CLI
//!
//! Terminal front end for the dashboard:
//! - Show the dashboard (boot, then render)
//! - Trigger insight generation
//! - Seed demo data
//! - Generate a config file

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use signal_noise::config::{generate_default_config, Config, LoggingConfig};
use signal_noise::insights::{Cohort, SystemClock};
use signal_noise::render::{card_views, render_text};
use signal_noise::store::{boot, generate, seed, Phase, SharedStore, Store};
use signal_noise::HttpClient;

#[derive(Parser)]
#[command(name = "signal-noise")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Behavioral intelligence for product teams")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides config and SIGNAL_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in, fetch insights and print the dashboard
    Dashboard {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Generate insights for the last week, then print the dashboard
    Generate {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Load demonstration data into the backend
    Seed,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
pub struct ViewArgs {
    /// Cohort filter (all, cohort_0, cohort_1, cohort_2)
    #[arg(short, long, default_value = "all")]
    pub cohort: Cohort,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    init_logging(&config.logging);
    tracing::debug!("Backend: {}", config.api.base_url);

    let api = HttpClient::new(config.api.base_url.clone());
    let store = SharedStore::new(Store::new(config.dashboard.stale_responses));
    let shell = config.shell();

    match cli.command {
        Commands::Dashboard { view } => {
            boot(&api, &store, &shell).await;
            print_dashboard(&store, &view)?;
        }

        Commands::Generate { view } => {
            boot(&api, &store, &shell).await;
            if store.snapshot().is_authenticated() {
                generate(&api, &SystemClock, &store, &shell)
                    .await
                    .inspect_err(|e| tracing::error!(error = %e, "Generate failed"))
                    .context("Generate failed")?;
            }
            print_dashboard(&store, &view)?;
        }

        Commands::Seed => {
            seed(&api, &store)
                .await
                .inspect_err(|e| tracing::error!(error = %e, "Seed failed"))
                .context("Seed failed")?;
            println!("{}", store.snapshot().status());
        }

        Commands::Config { output } => write_default_config(output.as_deref())?,
    }

    if store.snapshot().phase() == Phase::Unauthenticated {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("signal_noise={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so the dashboard on stdout stays clean
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_dashboard(store: &SharedStore, view: &ViewArgs) -> anyhow::Result<()> {
    store.select_cohort(view.cohort);
    let state = store.snapshot();

    match view.format {
        Format::Text => print!("{}", render_text(&state)),
        Format::Json => {
            let body = serde_json::json!({
                "status": state.status(),
                "cohort": state.cohort(),
                "insights": card_views(&state.visible_insights()),
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}

fn write_default_config(output: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", config),
    }

    Ok(())
}
