//! Covid CLI
//!
//! Command-line access to the statistics the dashboard shows:
//! - Print the world summary
//! - List countries
//! - Inspect map clusters at a zoom level
//! - Generate a config file

use anyhow::Context;
use chrono::{Local, Offset};
use clap::{Parser, Subcommand, ValueEnum};
use covid_dashboard::view::{format, Delta, FooterView};
use covid_dashboard::{
    generate_default_config, logging, ClusterIndex, Config, CountryStat, Feature, FetchError,
    StatsClient, StatsSource, Summary, Viewport,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "covid-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "COVID-19 statistics from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Statistics API origin (default: from config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: ~/.config/covid-dashboard/config.toml, then ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show worldwide totals
    Summary,

    /// List per-country statistics
    Countries {
        /// Only show the first N countries
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show map markers at a zoom level
    Clusters {
        /// Zoom level (default: configured initial zoom)
        #[arg(short, long)]
        zoom: Option<f64>,
        /// Only show markers in view of a camera centred here
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Flat country record for CSV output
#[derive(Serialize)]
struct CountryRecord<'a> {
    country: &'a str,
    today_cases: i64,
    cases: i64,
    deaths: i64,
    recovered: i64,
    lat: Option<f64>,
    long: Option<f64>,
}

impl<'a> From<&'a CountryStat> for CountryRecord<'a> {
    fn from(stat: &'a CountryStat) -> Self {
        let position = stat.position();
        Self {
            country: &stat.country,
            today_cases: stat.today_cases,
            cases: stat.cases,
            deaths: stat.deaths,
            recovered: stat.recovered,
            lat: position.map(|(_, lat)| lat),
            long: position.map(|(lng, _)| lng),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Config { output } => write_default_config(output.as_ref())?,

        Commands::Summary => {
            let (config, client) = connect(&cli)?;
            let summary = client.summary().await.unwrap_or_else(|e| fail(&config, e));
            print_summary(&summary, cli.format)?;
        }

        Commands::Countries { limit } => {
            let (config, client) = connect(&cli)?;
            let mut countries = client.countries().await.unwrap_or_else(|e| fail(&config, e));
            if let Some(limit) = limit {
                countries.truncate(*limit);
            }
            print_countries(&countries, cli.format)?;
        }

        Commands::Clusters { zoom, lat, lon } => {
            let (config, client) = connect(&cli)?;
            let countries = client.countries().await.unwrap_or_else(|e| fail(&config, e));
            let index = ClusterIndex::build(&countries, config.map.cluster_options());

            let initial = config.map.initial_viewport();
            let camera = Viewport {
                zoom: zoom.unwrap_or(initial.zoom),
                latitude: lat.unwrap_or(initial.latitude),
                longitude: lon.unwrap_or(initial.longitude),
                ..initial
            }
            .normalized();

            let features = if lat.is_some() {
                index.features_in(&camera.bounds(2.0), camera.zoom)
            } else {
                index.features(camera.zoom)
            };
            print_clusters(&index, &features, camera.zoom, cli.format)?;
        }
    }

    Ok(())
}

/// Load config, apply flag overrides, start logging and build the client
fn connect(cli: &Cli) -> anyhow::Result<(Config, StatsClient)> {
    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    logging::init(&config.logging, None)?;

    let client = StatsClient::new(config.api.clone()).context("Failed to build HTTP client")?;
    Ok((config, client))
}

fn fail(config: &Config, error: FetchError) -> ! {
    eprintln!("Cannot load statistics from {}", config.api.base_url);
    eprintln!("Error: {}", error);
    std::process::exit(1);
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }
    Ok(())
}

fn print_summary(summary: &Summary, output: OutputFormat) -> anyhow::Result<()> {
    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.serialize(summary)?;
            writer.flush()?;
        }
        OutputFormat::Table => {
            let footer = FooterView::new(summary, &Local::now().offset().fix());

            println!("{}", FooterView::TITLE);
            println!("{}", "-".repeat(40));
            println!("{:<20} {}", footer.updated.label, footer.updated.value);
            for stat in footer.totals() {
                println!("{:<20} {:>19}", stat.label, stat.value);
            }
            println!();
            println!("{:<20} {:>19}", "Today Cases", format::signed(summary.today_cases));
            println!("{:<20} {:>19}", "Today Deaths", format::signed(summary.today_deaths));
            println!("{:<20} {:>19}", "Active", format::count(summary.active));
            println!("{:<20} {:>19}", "Critical", format::count(summary.critical));
            println!(
                "{:<20} {:>19}",
                "Affected Countries",
                format::count(summary.affected_countries as u64)
            );
        }
    }
    Ok(())
}

fn print_countries(countries: &[CountryStat], output: OutputFormat) -> anyhow::Result<()> {
    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(countries)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for country in countries {
                writer.serialize(CountryRecord::from(country))?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            if countries.is_empty() {
                println!("No countries reported.");
                return Ok(());
            }

            let mut out = std::io::stdout().lock();
            writeln!(
                out,
                "{:<32} {:>12} {:>14} {:>12} {:>14}",
                "Country", "Today Cases", "Total Cases", "Total Deaths", "Recovered"
            )?;
            writeln!(out, "{}", "-".repeat(88))?;

            for country in countries {
                writeln!(
                    out,
                    "{:<32} {:>12} {:>14} {:>12} {:>14}",
                    country.country,
                    Delta::new(country.today_cases).text,
                    format::signed(country.cases),
                    format::signed(country.deaths),
                    format::signed(country.recovered)
                )?;
            }
        }
    }
    Ok(())
}

fn print_clusters(
    index: &ClusterIndex,
    features: &[Feature],
    zoom: f64,
    output: OutputFormat,
) -> anyhow::Result<()> {
    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(features)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for feature in features {
                writer.serialize(feature)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            println!(
                "{} markers at zoom {:.1} ({} countries placed)",
                features.len(),
                zoom,
                index.len()
            );
            println!();
            println!(
                "{:>6} {:<24} {:>8} {:>14} {:>9} {:>9} {:>8}",
                "ID", "Label", "Points", "Cases", "Lat", "Lon", "Expand"
            );
            println!("{}", "-".repeat(84));

            for feature in features {
                let expand = index
                    .expansion_zoom(feature.id)
                    .map(|z| z.to_string())
                    .unwrap_or_else(|_| "-".to_string());
                println!(
                    "{:>6} {:<24} {:>8} {:>14} {:>9.3} {:>9.3} {:>8}",
                    feature.id,
                    feature.label,
                    feature.point_count,
                    format::signed(feature.cases),
                    feature.latitude,
                    feature.longitude,
                    expand
                );
            }
        }
    }
    Ok(())
}
