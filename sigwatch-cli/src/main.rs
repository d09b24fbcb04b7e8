//! Sigwatch CLI — deviation monitor commands.
//!
//! Commands:
//! - `run` — execute one monitor run and write the dashboard artifacts
//! - `fetch` — data-source smoke check: fetch a series and print its shape

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sigwatch_core::data::{PriceProvider, SyntheticProvider, YahooProvider};
use sigwatch_runner::{
    run_monitor, ChartJsRenderer, LogSink, MonitorConfig, RunOutcome, StdoutObserver,
};

#[derive(Parser)]
#[command(name = "sigwatch", about = "Sigwatch CLI: rolling-deviation market monitor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute one monitor run and write dashboard.html / data.json.
    Run {
        /// Path to a TOML config file. Flags below override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Symbol to monitor. Defaults to ^GSPC.
        #[arg(long)]
        symbol: Option<String>,

        /// Calendar days of history to request (>= 300).
        #[arg(long)]
        lookback_days: Option<i64>,

        /// Rolling window in trading periods.
        #[arg(long)]
        window: Option<usize>,

        /// Sessions shown in the dashboard chart (>= 30).
        #[arg(long)]
        chart_sessions: Option<usize>,

        /// Output directory for artifacts. Defaults to ./reports.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Use the deterministic synthetic provider instead of Yahoo Finance.
        #[arg(long, default_value_t = false)]
        synthetic: bool,
    },
    /// Fetch a series and print its shape without writing artifacts.
    Fetch {
        /// Symbol to fetch. Defaults to ^GSPC.
        #[arg(long)]
        symbol: Option<String>,

        /// Calendar days of history to request.
        #[arg(long, default_value_t = 300)]
        lookback_days: i64,

        /// Use the deterministic synthetic provider instead of Yahoo Finance.
        #[arg(long, default_value_t = false)]
        synthetic: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            symbol,
            lookback_days,
            window,
            chart_sessions,
            output_dir,
            synthetic,
        } => run_cmd(
            config,
            symbol,
            lookback_days,
            window,
            chart_sessions,
            output_dir,
            synthetic,
        ),
        Commands::Fetch {
            symbol,
            lookback_days,
            synthetic,
        } => fetch_cmd(symbol, lookback_days, synthetic),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_cmd(
    config_path: Option<PathBuf>,
    symbol: Option<String>,
    lookback_days: Option<i64>,
    window: Option<usize>,
    chart_sessions: Option<usize>,
    output_dir: Option<PathBuf>,
    synthetic: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => MonitorConfig::from_file(path)?,
        None => MonitorConfig::default(),
    };

    if let Some(symbol) = symbol {
        config.symbol = symbol;
    }
    if let Some(days) = lookback_days {
        config.lookback_days = days;
    }
    if let Some(window) = window {
        config.window = window;
    }
    if let Some(sessions) = chart_sessions {
        config.chart_sessions = sessions;
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    config.validate()?;

    let provider = build_provider(synthetic);
    let outcome = run_monitor(
        &config,
        provider.as_ref(),
        &ChartJsRenderer,
        &LogSink,
        Some(&StdoutObserver),
    )?;

    print_summary(&config, &outcome);

    if outcome.is_degraded() {
        // The degraded dashboard is already on disk; the exit code just
        // signals the failure to schedulers.
        std::process::exit(1);
    }

    Ok(())
}

fn fetch_cmd(symbol: Option<String>, lookback_days: i64, synthetic: bool) -> Result<()> {
    let symbol = symbol.unwrap_or_else(|| "^GSPC".to_string());
    let end = chrono::Local::now().date_naive();
    let start = end - chrono::Duration::days(lookback_days);

    let provider = build_provider(synthetic);
    let series = provider.fetch(&symbol, start, end)?;

    let first = series.points()[0];
    let last = series.last();
    println!("Provider:     {}", provider.name());
    println!("Symbol:       {}", series.symbol());
    println!("Sessions:     {}", series.len());
    println!("First:        {} ({:.2})", first.date, first.close);
    println!("Last:         {} ({:.2})", last.date, last.close);
    println!("Fingerprint:  {}", series.fingerprint());

    Ok(())
}

fn build_provider(synthetic: bool) -> Box<dyn PriceProvider> {
    if synthetic {
        Box::new(SyntheticProvider::new())
    } else {
        Box::new(YahooProvider::new())
    }
}

fn print_summary(config: &MonitorConfig, outcome: &RunOutcome) {
    println!();
    println!("=== Monitor Run ===");
    println!("Symbol:         {}", config.symbol);
    println!("Window:         {} periods", config.window);

    match (&outcome.snapshot, &outcome.classification) {
        (Some(snapshot), Some(classification)) => {
            println!("As of:          {}", snapshot.date);
            println!("Price:          {:.2}", snapshot.price);
            println!("Moving average: {:.2}", snapshot.mean);
            println!("Stddev:         {:.2}", snapshot.stddev);
            println!(
                "Deviation:      {:.2} sigma {}",
                snapshot.score.abs(),
                classification.direction.as_str()
            );
            println!("Status:         {}", classification.band.label());
        }
        _ => {
            if let Some(error) = &outcome.error {
                println!("Status:         DEGRADED ({error})");
            }
        }
    }

    println!("Dashboard:      {}", outcome.paths.dashboard.display());
    if let Some(path) = &outcome.paths.snapshot {
        println!("Snapshot:       {}", path.display());
    }
    if let Some(path) = &outcome.paths.chart_image {
        println!("Chart image:    {}", path.display());
    }
    println!();
}
