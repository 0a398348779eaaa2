//! CLI entry point for the ride report tool.
//!
//! Builds the resident trip dataset once from the configured trip log, then
//! answers menu queries against it: a single query, the whole menu, or a
//! stream of choices read from stdin.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ride_report::config::ReportConfig;
use ride_report::dataset::RideDataset;
use ride_report::output::{print_pretty, render_json, render_menu, render_text};
use ride_report::query::{Query, QueryOutput, answer};
use std::ffi::OsStr;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "ride_report")]
#[command(about = "Canned statistics over a ride-sharing trip log", long_about = None)]
struct Cli {
    /// Trip log CSV: a local path or an http(s) URL (overrides RIDES_SOURCE)
    #[arg(short, long, global = true, value_name = "FILE_OR_URL")]
    source: Option<String>,

    /// Currency label for fare figures (overrides REPORT_CURRENCY)
    #[arg(long, global = true)]
    currency: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available analyses
    Menu,
    /// Answer a single menu choice (a-h)
    Query {
        /// Menu choice identifier
        #[arg(value_name = "CHOICE")]
        choice: String,

        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Answer every menu choice in order
    Report {
        /// Print the results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Read menu choices from stdin, one per line, and answer each
    Repl,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let config = ReportConfig::from_env().with_overrides(cli.source, cli.currency);

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = Path::new(&config.log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&config.log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("ride_report.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    match cli.command {
        Commands::Menu => println!("{}", render_menu()),
        Commands::Query { choice, json } => {
            let dataset = load_dataset(&config).await?;
            let output = answer(&dataset, &choice);
            print_pretty(&output);
            emit(&output, json, &config.currency)?;
        }
        Commands::Report { json } => {
            let dataset = load_dataset(&config).await?;
            if json {
                let outputs: Vec<QueryOutput> =
                    Query::ALL.iter().map(|q| q.run(&dataset)).collect();
                println!("{}", serde_json::to_string_pretty(&outputs)?);
            } else {
                for query in Query::ALL {
                    println!("== {}) {}", query.code(), query.label());
                    println!("{}\n", render_text(&query.run(&dataset), &config.currency));
                }
            }
        }
        Commands::Repl => {
            let dataset = load_dataset(&config).await?;
            repl(&dataset, &config.currency).await?;
        }
    }

    Ok(())
}

/// Builds the resident dataset; any failure here is fatal.
async fn load_dataset(config: &ReportConfig) -> Result<RideDataset> {
    let dataset = RideDataset::load(&config.source)
        .await
        .with_context(|| format!("Failed to build ride dataset from '{}'", config.source))?;

    let summary = dataset.normalization();
    info!(
        remapped = summary.remapped,
        dropped = summary.dropped,
        completed = dataset.completed().len(),
        "Dataset loaded"
    );
    Ok(dataset)
}

fn emit(output: &QueryOutput, json: bool, currency: &str) -> Result<()> {
    if json {
        println!("{}", render_json(output)?);
    } else {
        println!("{}", render_text(output, currency));
    }
    Ok(())
}

/// One line of `repl` input.
#[derive(Debug, PartialEq, Eq)]
enum ReplInput<'a> {
    Blank,
    Quit,
    Choice(&'a str),
}

/// Classifies a stdin line. Only the line terminator is stripped, so a
/// choice padded with spaces is not a menu code.
fn repl_input(line: &str) -> ReplInput<'_> {
    match line.trim_end_matches(['\r', '\n']) {
        "" => ReplInput::Blank,
        "q" | "quit" => ReplInput::Quit,
        choice => ReplInput::Choice(choice),
    }
}

/// Answers menu choices from stdin until EOF or `q`.
async fn repl(dataset: &RideDataset, currency: &str) -> Result<()> {
    println!("{}", render_menu());
    info!("Waiting for menu choices on stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut answered = 0usize;

    while let Some(line) = lines.next_line().await? {
        let choice = match repl_input(&line) {
            ReplInput::Blank => continue,
            ReplInput::Quit => break,
            ReplInput::Choice(choice) => choice,
        };

        let output = answer(dataset, choice);
        if output == QueryOutput::InvalidChoice {
            warn!(choice, "Invalid menu choice");
        }
        println!("{}", render_text(&output, currency));
        answered += 1;
    }

    info!(answered, "Session finished");
    Ok(())
}
