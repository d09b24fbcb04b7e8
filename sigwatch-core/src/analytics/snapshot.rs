//! Current-deviation snapshot: the last observation against the last
//! defined rolling window.

use super::rolling::{AnalyticsError, RollingStats};
use crate::domain::PriceSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The latest price measured against its trailing window.
///
/// Invariant: `stddev > 0`. A flat trailing window makes the deviation score
/// undefined and fails construction with `ZeroVariance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviationSnapshot {
    pub date: NaiveDate,
    pub price: f64,
    pub mean: f64,
    pub stddev: f64,
    /// Standard deviations from the mean: (price - mean) / stddev.
    pub score: f64,
}

impl DeviationSnapshot {
    /// Derive the snapshot from a series and its rolling statistics.
    ///
    /// `rolling` must have been computed from `series`.
    pub fn from_series(
        series: &PriceSeries,
        rolling: &RollingStats,
    ) -> Result<Self, AnalyticsError> {
        assert_eq!(
            series.len(),
            rolling.len(),
            "rolling stats not aligned to series"
        );

        let last = series.last();
        let (mean, stddev) = rolling.latest();

        if stddev == 0.0 {
            return Err(AnalyticsError::ZeroVariance);
        }

        Ok(Self {
            date: last.date,
            price: last.close,
            mean,
            stddev,
            score: (last.close - mean) / stddev,
        })
    }
}
