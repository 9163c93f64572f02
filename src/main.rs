//! CLI entry point for the Olympics explorer.
//!
//! Loads the athlete-events document once, applies Year/Sport/Sex filters and
//! prints medal tables and body-measurement distributions, or exports them.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use olympics_explorer::{
    config::AppConfig,
    fetch::BasicClient,
    loader::{DataSource, DatasetLoader},
    model::Dataset,
    output::{export, render_distribution, render_table, to_json, write_rows_to},
    pipeline::{Analysis, FilterSelection, GroupField},
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::Directive,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const FETCH_TIMEOUT_SECS: u64 = 120;

#[derive(Parser)]
#[command(name = "olympics_explorer")]
#[command(about = "Filter and summarize Olympic athlete-event data", long_about = None)]
struct Cli {
    /// Path to file or URL to fetch (overrides OLYMPICS_DATA_SOURCE)
    #[arg(short, long, global = true, value_name = "FILE_OR_URL")]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print medal tables and distributions for a selection
    Summary {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print the full report as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Also print the first rows of the unfiltered data
        #[arg(long, default_value_t = false)]
        show_raw: bool,

        /// Number of raw rows to print with --show-raw
        #[arg(long, default_value_t = 20)]
        raw_limit: usize,
    },
    /// List the distinct years, sports and sexes available for filtering
    Values,
    /// Write the filtered rows and the three medal tables as CSV files
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Directory to write CSV files into
        #[arg(short, long, default_value = "export")]
        output_dir: PathBuf,
    },
}

/// Repeatable filter flags. A flag that is never given selects every value.
#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Year to include (repeatable)
    #[arg(long = "year", value_name = "YEAR")]
    years: Vec<i32>,

    /// Sport to include (repeatable)
    #[arg(long = "sport", value_name = "SPORT")]
    sports: Vec<String>,

    /// Sex to include (repeatable)
    #[arg(long = "sex", value_name = "SEX")]
    sexes: Vec<String>,
}

impl FilterArgs {
    fn into_selection(self, dataset: &Dataset) -> FilterSelection {
        FilterSelection::with_defaults(dataset, self.years, self.sports, self.sexes)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let config = AppConfig::from_env();
    let _file_guard = init_logging(&config)?;

    let cli = Cli::parse();

    let source = DataSource::parse(cli.source.as_deref().unwrap_or(&config.data_source));
    let client = BasicClient::with_timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))?;
    let loader = DatasetLoader::new(source, client);
    let dataset = loader.load().await?;

    match cli.command {
        Commands::Summary {
            filters,
            json,
            show_raw,
            raw_limit,
        } => {
            let selection = filters.into_selection(&dataset);

            if show_raw {
                println!("Raw data: {} rows", dataset.len());
                write_rows_to(std::io::stdout().lock(), dataset.iter().take(raw_limit))?;
                println!();
            }

            let analysis = Analysis::compute(&dataset, &selection);
            info!(
                total_rows = analysis.total_rows,
                filtered_rows = analysis.filtered_rows,
                "Analysis complete"
            );

            if json {
                println!("{}", to_json(&analysis)?);
            } else {
                print_summary(&analysis);
            }
        }
        Commands::Values => {
            let years: Vec<String> = dataset.distinct_years().iter().map(i32::to_string).collect();
            let sports: Vec<String> = dataset.distinct_sports().into_iter().collect();
            let sexes: Vec<String> = dataset.distinct_sexes().into_iter().collect();

            println!("Years:  {}", years.join(", "));
            println!("Sports: {}", sports.join(", "));
            println!("Sexes:  {}", sexes.join(", "));
        }
        Commands::Export {
            filters,
            output_dir,
        } => {
            let selection = filters.into_selection(&dataset);
            export(&output_dir, &dataset, &selection)?;
        }
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_logging(config: &AppConfig) -> Result<WorkerGuard> {
    let (log_dir, log_file_name) = config.log_location();

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse::<Directive>()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse::<Directive>()?),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

fn print_summary(analysis: &Analysis) {
    println!(
        "Filtered data: {} of {} rows",
        analysis.filtered_rows, analysis.total_rows
    );

    println!("\n== Medal distribution ==");
    for field in GroupField::ALL {
        println!("\nMedals by {}", field.name().to_lowercase());
        print!("{}", render_table(analysis.table(field)));
    }

    println!("\n== Additional analysis ==");
    for distribution in &analysis.distributions {
        println!();
        print!("{}", render_distribution(distribution));
    }
}
