//! Report rendering and artifact export.

pub mod artifacts;
pub mod chart;
pub mod html;
pub mod json;

pub use artifacts::{ArtifactError, ArtifactPaths, ArtifactWriter};
pub use chart::{ChartJsRenderer, ChartRenderer, ChartSeries, RenderError};
pub use json::SnapshotRecord;
