//! Sigwatch Runner — run orchestration, report rendering, artifact export.
//!
//! Wires the core analytics into a single batch run: fetch a price series,
//! compute rolling deviation, classify it, and emit the dashboard/snapshot
//! artifacts. The degraded-artifact contract lives here: a run always leaves
//! a dashboard behind, even when every upstream stage failed.

pub mod config;
pub mod notify;
pub mod pipeline;
pub mod reporting;

pub use config::{ConfigError, MonitorConfig};
pub use notify::{format_alert, AlertSink, LogSink};
pub use pipeline::{run_monitor, RunError, RunObserver, RunOutcome, RunStage, StdoutObserver};
pub use reporting::{
    ArtifactError, ArtifactPaths, ArtifactWriter, ChartJsRenderer, ChartRenderer, ChartSeries,
    SnapshotRecord,
};
