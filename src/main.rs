//! Hydrosight CLI
//!
//! Terminal interface to the water-level prediction service:
//! - List monitored cities
//! - Show historical levels
//! - Request predictions
//! - Compare predictions against held-out actuals

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hydrosight::client::{ClientConfig, PredictionClient};
use hydrosight::config::Config;
use hydrosight::dashboard::Dashboard;
use hydrosight::series::{display_name, historical_series, Anchor, ChartPoint, ComparisonPoint};
use hydrosight::state::Phase;

#[derive(Parser)]
#[command(name = "hydrosight")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Water-level predictions for monitored cities")]
#[command(
    long_about = "Hydrosight talks to a water-level prediction service.\nInspect historical levels, request forecasts, and check how the model\nperformed against held-out observations."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Prediction service URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the monitored cities
    Cities,

    /// Show historical water levels for a city
    History {
        /// City key (as listed by `cities`)
        city: String,
        /// Number of most recent days to show
        #[arg(short, long, default_value = "30")]
        days: usize,
    },

    /// Request a water-level forecast
    Predict {
        /// City key (default: config default_city, else the first listed city)
        city: Option<String>,
        /// Days to predict (1-30)
        #[arg(short, long, default_value = "7")]
        days: u16,
    },

    /// Compare recent predictions against held-out actual levels
    Compare {
        /// City key (default: config default_city, else the first listed city)
        city: Option<String>,
        /// Held-out days to compare (1-14)
        #[arg(short, long, default_value = "7")]
        test_days: u16,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    init_tracing(&config);

    let cli = Cli::parse();

    let base_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| config.service.base_url.clone());
    let client = PredictionClient::new(ClientConfig {
        base_url,
        request_timeout_ms: config.service.request_timeout_ms,
    });

    match cli.command {
        Commands::Cities => {
            let cities = client.list_cities().await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&cities)?);
            } else if cities.is_empty() {
                println!("No cities configured on the service.");
            } else {
                println!("{:<20} {}", "Key", "Name");
                println!("{}", "-".repeat(40));
                for city in cities {
                    println!("{:<20} {}", city, display_name(&city));
                }
            }
        }

        Commands::History { city, days } => {
            let records = client.fetch_historical(&city).await?;
            let series = historical_series(&records, &city, days, Anchor::Tail);

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else if series.is_empty() {
                println!("No measured levels for {}", display_name(&city));
            } else {
                print_series_table(&series);
            }
        }

        Commands::Predict { city, days } => {
            let mut dashboard = Dashboard::new(client);
            dashboard.set_days_to_predict(days)?;

            connect(&mut dashboard, city.or(config.service.default_city)).await;
            dashboard.run_prediction().await;

            if let Some(error) = dashboard.predictions().error() {
                eprintln!("Prediction failed: {}", error);
                std::process::exit(1);
            }

            let combined = dashboard.combined_series();

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&combined)?);
            } else {
                let city = dashboard.selections().city().unwrap_or("-").to_string();
                let historical_len = dashboard
                    .historical()
                    .data()
                    .map(Vec::len)
                    .unwrap_or_default();
                let predicted_len = combined.len() - historical_len;

                println!(
                    "Forecast for {} ({} historical + {} predicted days)",
                    display_name(&city),
                    historical_len,
                    predicted_len
                );
                println!();
                print_series_table(&combined);
                println!();
                println!("Predicted days:  {}", predicted_len);
                println!("Mean level:      {:.2}", dashboard.mean_predicted_level());
            }
        }

        Commands::Compare { city, test_days } => {
            let mut dashboard = Dashboard::new(client);
            dashboard.set_test_days(test_days)?;

            connect(&mut dashboard, city.or(config.service.default_city)).await;
            dashboard.run_comparison().await;

            if let Some(error) = dashboard.comparison().error() {
                eprintln!("Comparison failed: {}", error);
                std::process::exit(1);
            }

            let comparison = dashboard
                .comparison()
                .data()
                .cloned()
                .unwrap_or_default();

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else if comparison.is_empty() {
                println!("No comparison data returned.");
            } else {
                let city = dashboard.selections().city().unwrap_or("-").to_string();

                println!(
                    "Comparing {} held-out days for {}",
                    comparison.len(),
                    display_name(&city)
                );
                println!();
                print_comparison_table(&comparison);
                println!();
                println!("Model accuracy:  {:.1}%", dashboard.accuracy());
            }
        }

        Commands::Config { output } => {
            let content = hydrosight::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }
    }

    Ok(())
}

/// Initialize tracing from the logging config
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Load the city list and select the requested city (or the first one)
async fn connect(dashboard: &mut Dashboard, city: Option<String>) {
    if let Err(e) = dashboard.load_cities().await {
        eprintln!("Cannot reach the prediction service: {}", e);
        eprintln!();
        eprintln!("Check the service URL (--api-url or the [service] config section).");
        std::process::exit(1);
    }

    if let Some(city) = city {
        if !dashboard.cities().iter().any(|c| c == &city) {
            eprintln!("Unknown city: {}", city);
            eprintln!("Available: {}", dashboard.cities().join(", "));
            std::process::exit(1);
        }
        dashboard.select_city(&city).await;
    } else if dashboard.selections().city().is_none() {
        eprintln!("No cities configured on the service.");
        std::process::exit(1);
    }

    // The historical fetch may have failed even though the city list loaded;
    // commands that need it will refetch, so only warn here.
    if dashboard.historical().phase() == Phase::Failed {
        if let Some(error) = dashboard.historical().error() {
            tracing::warn!("Historical fetch failed: {}", error);
        }
    }
}

fn print_series_table(series: &[ChartPoint]) {
    println!("{:<12} {:>10}  {}", "Date", "Level", "Kind");
    println!("{}", "-".repeat(36));

    for point in series {
        println!(
            "{:<12} {:>10.2}  {}",
            point.date.format("%Y-%m-%d"),
            point.value,
            match point.kind {
                hydrosight::series::SeriesKind::Historical => "historical",
                hydrosight::series::SeriesKind::Prediction => "prediction",
            }
        );
    }
}

fn print_comparison_table(comparison: &[ComparisonPoint]) {
    println!(
        "{:<12} {:>10} {:>10} {:>9}",
        "Date", "Actual", "Predicted", "Error %"
    );
    println!("{}", "-".repeat(44));

    for point in comparison {
        let error = if point.actual == 0.0 {
            "-".to_string()
        } else {
            format!(
                "{:.1}",
                ((point.actual - point.predicted) / point.actual).abs() * 100.0
            )
        };
        println!(
            "{:<12} {:>10.2} {:>10.2} {:>9}",
            point.date.format("%Y-%m-%d"),
            point.actual,
            point.predicted,
            error
        );
    }
}
