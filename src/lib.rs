//! # Signal > Noise
//!
//! Behavioral intelligence dashboard for product teams. The backend computes
//! insights; this crate fetches them, keeps the dashboard state, and renders
//! it.
//!
//! ## Modules
//!
//! - [`insights`]: insight records, cohorts and the generation window
//! - [`client`]: the [`InsightsApi`] trait and its error taxonomy
//! - [`store`]: state container, pure reducer and the boot/generate/seed sequences
//! - [`render`]: insight card and funnel view models, terminal rendering
//! - `config`: TOML and environment configuration (`native` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use signal_noise::client::HttpClient;
//! use signal_noise::insights::{Cohort, SystemClock};
//! use signal_noise::store::{boot, generate, SharedStore, ShellConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpClient::new("http://localhost:8000");
//!     let store = SharedStore::default();
//!     let config = ShellConfig::default();
//!
//!     boot(&api, &store, &config).await;
//!     generate(&api, &SystemClock, &store, &config).await?;
//!
//!     store.select_cohort(Cohort::Cohort1);
//!     println!("{}", signal_noise::render::render_text(&store.snapshot()));
//!
//!     Ok(())
//! }
//! ```

pub mod client;
#[cfg(feature = "native")]
pub mod config;
pub mod insights;
pub mod render;
pub mod store;

// Re-export top-level types for convenience
pub use client::{ClientError, ClientResult, Failure, InsightsApi};

#[cfg(feature = "native")]
pub use client::HttpClient;

pub use insights::{Clock, Cohort, GenerateWindow, Insight, Session, SystemClock};

pub use render::{InsightCardView, FUNNEL_STAGES};

pub use store::{
    DashboardState, Dispatcher, Phase, SharedStore, ShellConfig, StalePolicy, Store,
};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
