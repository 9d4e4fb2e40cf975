//! Covid Dashboard
//!
//! Terminal dashboard for worldwide COVID-19 statistics.

use anyhow::Context;
use chrono::{Local, Offset};
use clap::Parser;
use covid_dashboard::{logging, tui, Config, Dashboard, DashboardOptions, StatsClient};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "covid-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal dashboard for worldwide COVID-19 statistics")]
struct Args {
    /// Config file (default: ~/.config/covid-dashboard/config.toml, then ./config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Statistics API origin, overrides the config file
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(url) = args.api_url {
        config.api.base_url = url;
    }

    // The screen belongs to the dashboard, so logs always go to a file
    let log_file = logging::default_log_file()
        .unwrap_or_else(|| std::env::temp_dir().join("covid-dashboard.log"));
    logging::init(&config.logging, Some(log_file))?;

    tracing::info!("Covid Dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Statistics API: {}", config.api.base_url);

    let client = StatsClient::new(config.api.clone()).context("Failed to build HTTP client")?;
    let dashboard = Dashboard::mount(Arc::new(client), DashboardOptions::from(&config.map));

    tui::run(dashboard, Local::now().offset().fix())
        .await
        .context("Terminal error")?;

    tracing::info!("Dashboard closed");
    Ok(())
}
