//! Rolling mean and standard deviation over the close series.
//!
//! Values are aligned to the input series: NaN before index window-1 (first
//! valid value at index window-1). Standard deviation is the sample
//! convention (divide by window-1), pinned by tests against hand-computed
//! values so the output is comparable with the reference dataset.

use crate::domain::PriceSeries;
use thiserror::Error;

/// Errors from the analytics layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("insufficient history: {len} sessions available, need {window}")]
    InsufficientHistory { len: usize, window: usize },

    #[error("zero variance over the trailing window (flat series), deviation undefined")]
    ZeroVariance,
}

/// Rolling mean/stddev series aligned to a [`PriceSeries`].
#[derive(Debug, Clone)]
pub struct RollingStats {
    window: usize,
    means: Vec<f64>,
    stddevs: Vec<f64>,
}

impl RollingStats {
    /// Compute trailing mean and sample stddev for each position i >= window-1.
    ///
    /// Fails with `InsufficientHistory` when the series is shorter than the
    /// window, so the last element of the result is always defined.
    pub fn compute(series: &PriceSeries, window: usize) -> Result<Self, AnalyticsError> {
        assert!(window >= 2, "rolling window must be >= 2");

        let closes = series.closes();
        let n = closes.len();
        if n < window {
            return Err(AnalyticsError::InsufficientHistory { len: n, window });
        }

        let mut means = vec![f64::NAN; n];
        let mut stddevs = vec![f64::NAN; n];

        for i in (window - 1)..n {
            let slice = &closes[i + 1 - window..=i];
            let mean = slice.iter().sum::<f64>() / window as f64;
            let variance = slice
                .iter()
                .map(|close| {
                    let diff = close - mean;
                    diff * diff
                })
                .sum::<f64>()
                / (window - 1) as f64;

            means[i] = mean;
            stddevs[i] = variance.sqrt();
        }

        Ok(Self {
            window,
            means,
            stddevs,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn stddevs(&self) -> &[f64] {
        &self.stddevs
    }

    /// (mean, stddev) at the final position. Defined by construction.
    pub fn latest(&self) -> (f64, f64) {
        let last = self.means.len() - 1;
        (self.means[last], self.stddevs[last])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{assert_approx, DEFAULT_EPSILON};
    use crate::domain::PriceSeries;
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        PriceSeries::from_daily_closes("TEST", start, closes).unwrap()
    }

    #[test]
    fn rolling_3_basic() {
        let s = series(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let rolling = RollingStats::compute(&s, 3).unwrap();

        assert!(rolling.means()[0].is_nan());
        assert!(rolling.means()[1].is_nan());
        assert!(rolling.stddevs()[1].is_nan());

        // window [10,11,12]: mean 11, sample variance (1+0+1)/2 = 1
        assert_approx(rolling.means()[2], 11.0, DEFAULT_EPSILON);
        assert_approx(rolling.stddevs()[2], 1.0, DEFAULT_EPSILON);

        // window [12,13,14]: mean 13, stddev 1
        assert_approx(rolling.means()[4], 13.0, DEFAULT_EPSILON);
        assert_approx(rolling.stddevs()[4], 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sample_convention_not_population() {
        // window [2,4,6]: mean 4, sample variance (4+0+4)/2 = 4 -> stddev 2.
        // The population convention would give sqrt(8/3) ~= 1.633.
        let s = series(&[2.0, 4.0, 6.0]);
        let rolling = RollingStats::compute(&s, 3).unwrap();
        assert_approx(rolling.stddevs()[2], 2.0, DEFAULT_EPSILON);
    }

    #[test]
    fn window_equal_to_length() {
        let s = series(&[10.0, 20.0]);
        let rolling = RollingStats::compute(&s, 2).unwrap();
        let (mean, stddev) = rolling.latest();
        assert_approx(mean, 15.0, DEFAULT_EPSILON);
        // sample variance (25+25)/1 = 50
        assert_approx(stddev, 50.0_f64.sqrt(), DEFAULT_EPSILON);
    }

    #[test]
    fn short_series_fails() {
        let s = series(&[10.0, 11.0]);
        let err = RollingStats::compute(&s, 3).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::InsufficientHistory { len: 2, window: 3 }
        );
    }

    #[test]
    fn one_short_of_window_fails() {
        let closes: Vec<f64> = (0..199).map(|i| 100.0 + i as f64 * 0.1).collect();
        let s = series(&closes);
        let err = RollingStats::compute(&s, 200).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::InsufficientHistory {
                len: 199,
                window: 200
            }
        );
    }

    #[test]
    fn constant_series_has_zero_stddev() {
        let s = series(&[100.0; 5]);
        let rolling = RollingStats::compute(&s, 3).unwrap();
        let (mean, stddev) = rolling.latest();
        assert_approx(mean, 100.0, DEFAULT_EPSILON);
        assert_eq!(stddev, 0.0);
    }
}
