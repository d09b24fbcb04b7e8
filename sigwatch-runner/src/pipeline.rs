//! Pipeline orchestrator.
//!
//! One run walks the stage machine Idle -> Fetching -> Computing ->
//! Classifying -> Rendering -> Done, with any stage able to drop to
//! Degraded -> Done on failure. The degraded path still renders and writes a
//! dashboard: after every run, success or not, `dashboard.html` exists and
//! reflects this run. No retries, no resumption.

use std::path::Path;

use chrono::Utc;
use thiserror::Error;

use sigwatch_core::analytics::{
    classify, AnalyticsError, Band, Classification, DeviationSnapshot, RollingStats,
};
use sigwatch_core::data::{FetchError, PriceProvider};
use sigwatch_core::domain::PriceSeries;

use crate::config::MonitorConfig;
use crate::notify::{format_alert, AlertSink};
use crate::reporting::chart::unavailable_markup;
use crate::reporting::{
    html, ArtifactError, ArtifactPaths, ArtifactWriter, ChartRenderer, ChartSeries, SnapshotRecord,
};

/// Stages of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Idle,
    Fetching,
    Computing,
    Classifying,
    Rendering,
    Done,
    Degraded,
}

impl std::fmt::Display for RunStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RunStage::Idle => "idle",
            RunStage::Fetching => "fetching",
            RunStage::Computing => "computing",
            RunStage::Classifying => "classifying",
            RunStage::Rendering => "rendering",
            RunStage::Done => "done",
            RunStage::Degraded => "degraded",
        };
        f.write_str(name)
    }
}

/// Failures that abort the analysis and route the run to the degraded path.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("data retrieval failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("analysis failed: {0}")]
    Analytics(#[from] AnalyticsError),
}

/// Stage-by-stage progress callbacks.
///
/// The default observer prints one line per event; tests pass `None`.
pub trait RunObserver {
    /// A stage was entered (or, for Classifying, completed with its verdict).
    fn on_stage(&self, stage: RunStage, detail: &str);

    /// A stage failed; the run is switching to the degraded path.
    fn on_degraded(&self, stage: RunStage, error: &RunError);

    /// An optional output was skipped (chart markup fallback, image).
    fn on_skipped(&self, what: &str, reason: &str);

    /// An artifact file was written.
    fn on_artifact(&self, path: &Path);

    /// The run landed in the Alert band.
    fn on_alert(&self, message: &str);
}

/// Progress reporter that prints to stdout/stderr.
pub struct StdoutObserver;

impl RunObserver for StdoutObserver {
    fn on_stage(&self, stage: RunStage, detail: &str) {
        if detail.is_empty() {
            println!("[{stage}]");
        } else {
            println!("[{stage}] {detail}");
        }
    }

    fn on_degraded(&self, stage: RunStage, error: &RunError) {
        eprintln!("[{stage}] FAILED: {error}; writing degraded dashboard");
    }

    fn on_skipped(&self, what: &str, reason: &str) {
        eprintln!("[rendering] {what} skipped: {reason}");
    }

    fn on_artifact(&self, path: &Path) {
        println!("[rendering] wrote {}", path.display());
    }

    fn on_alert(&self, message: &str) {
        println!("[notify] {}", message.lines().next().unwrap_or(""));
    }
}

/// Terminal report of a run.
#[derive(Debug)]
pub struct RunOutcome {
    /// `Done` or `Degraded`.
    pub stage: RunStage,
    pub snapshot: Option<DeviationSnapshot>,
    pub classification: Option<Classification>,
    /// The failure that degraded the run, if any.
    pub error: Option<RunError>,
    pub paths: ArtifactPaths,
}

impl RunOutcome {
    pub fn is_degraded(&self) -> bool {
        self.stage == RunStage::Degraded
    }
}

/// Execute one monitor run end to end.
///
/// Fetch and analytics failures degrade the run; only artifact I/O failures
/// propagate, since then not even an error page can be produced.
pub fn run_monitor(
    config: &MonitorConfig,
    provider: &dyn PriceProvider,
    chart: &dyn ChartRenderer,
    sink: &dyn AlertSink,
    observer: Option<&dyn RunObserver>,
) -> Result<RunOutcome, ArtifactError> {
    let writer = ArtifactWriter::new(&config.output_dir)?;

    let started = Utc::now();
    let timestamp_iso = started.to_rfc3339();
    let timestamp_human = started.format("%Y-%m-%d %H:%M:%S UTC").to_string();

    if let Some(o) = observer {
        o.on_stage(RunStage::Idle, &format!("run starting for {}", config.symbol));
    }

    let (series, rolling, snapshot, classification) =
        match analyze(config, provider, observer) {
            Ok(products) => products,
            Err((stage, error)) => {
                if let Some(o) = observer {
                    o.on_degraded(stage, &error);
                }
                let page =
                    html::render_degraded(&config.symbol, &error.to_string(), &timestamp_human);
                let dashboard = writer.write_dashboard(&page)?;
                writer.remove_stale_snapshot()?;
                if let Some(o) = observer {
                    o.on_artifact(&dashboard);
                }
                return Ok(RunOutcome {
                    stage: RunStage::Degraded,
                    snapshot: None,
                    classification: None,
                    error: Some(error),
                    paths: ArtifactPaths {
                        dashboard,
                        snapshot: None,
                        chart_image: None,
                    },
                });
            }
        };

    if let Some(o) = observer {
        o.on_stage(RunStage::Rendering, "dashboard, snapshot, chart");
    }

    let chart_series = ChartSeries::tail(&series, &rolling, config.chart_sessions);
    let chart_markup = match chart.render_markup(&chart_series, config.window) {
        Ok(markup) => markup,
        Err(e) => {
            // The dashboard ships regardless; only the chart area degrades.
            if let Some(o) = observer {
                o.on_skipped("chart markup", &e.to_string());
            }
            unavailable_markup(&e.to_string())
        }
    };

    let page = html::render_dashboard(
        &snapshot,
        &classification,
        &config.symbol,
        config.window,
        &chart_markup,
        &timestamp_human,
    );
    let dashboard = writer.write_dashboard(&page)?;
    if let Some(o) = observer {
        o.on_artifact(&dashboard);
    }

    let record = SnapshotRecord::new(
        &snapshot,
        &classification,
        &config.symbol,
        config.window,
        timestamp_iso,
        series.fingerprint(),
    );
    let snapshot_path = writer.write_snapshot(&record.to_json()?)?;
    if let Some(o) = observer {
        o.on_artifact(&snapshot_path);
    }

    let chart_image = match chart.render_image(&chart_series, config.window) {
        Ok(Some(bytes)) => match writer.write_chart_image(&bytes) {
            Ok(path) => {
                if let Some(o) = observer {
                    o.on_artifact(&path);
                }
                Some(path)
            }
            Err(e) => {
                if let Some(o) = observer {
                    o.on_skipped("chart image", &e.to_string());
                }
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            if let Some(o) = observer {
                o.on_skipped("chart image", &e.to_string());
            }
            None
        }
    };

    if classification.band == Band::Alert {
        let message = format_alert(&snapshot, &classification, &config.symbol, config.window);
        if let Some(o) = observer {
            o.on_alert(&message);
        }
        sink.deliver(&message);
    }

    if let Some(o) = observer {
        o.on_stage(RunStage::Done, "run complete");
    }

    Ok(RunOutcome {
        stage: RunStage::Done,
        snapshot: Some(snapshot),
        classification: Some(classification),
        error: None,
        paths: ArtifactPaths {
            dashboard,
            snapshot: Some(snapshot_path),
            chart_image,
        },
    })
}

/// Fetch, compute, and classify. Failures carry the stage they happened in.
fn analyze(
    config: &MonitorConfig,
    provider: &dyn PriceProvider,
    observer: Option<&dyn RunObserver>,
) -> Result<(PriceSeries, RollingStats, DeviationSnapshot, Classification), (RunStage, RunError)> {
    let end = chrono::Local::now().date_naive();
    let start = end - chrono::Duration::days(config.lookback_days);

    if let Some(o) = observer {
        o.on_stage(
            RunStage::Fetching,
            &format!(
                "{} calendar days of {} from {}",
                config.lookback_days,
                config.symbol,
                provider.name()
            ),
        );
    }
    let series = provider
        .fetch(&config.symbol, start, end)
        .map_err(|e| (RunStage::Fetching, RunError::Fetch(e)))?;

    if let Some(o) = observer {
        o.on_stage(
            RunStage::Computing,
            &format!(
                "{} sessions through {}, rolling {}-period stats",
                series.len(),
                series.last().date,
                config.window
            ),
        );
    }
    let rolling = RollingStats::compute(&series, config.window)
        .map_err(|e| (RunStage::Computing, RunError::Analytics(e)))?;
    let snapshot = DeviationSnapshot::from_series(&series, &rolling)
        .map_err(|e| (RunStage::Computing, RunError::Analytics(e)))?;

    let classification = classify(snapshot.score);
    if let Some(o) = observer {
        o.on_stage(
            RunStage::Classifying,
            &format!(
                "{:.2} sigma {} the mean: {}",
                snapshot.score.abs(),
                classification.direction.as_str(),
                classification.band.label()
            ),
        );
    }

    Ok((series, rolling, snapshot, classification))
}
