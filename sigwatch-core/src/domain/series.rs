//! Price series — the fundamental market data unit.
//!
//! A `PriceSeries` is validated at construction: non-empty, strictly
//! increasing by date, every close positive. Downstream code (rolling
//! statistics, snapshot, rendering) relies on these invariants and never
//! re-checks them.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One daily observation: calendar date and closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Errors from series construction.
#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("series is empty")]
    Empty,

    #[error("dates out of order at index {index}: {date} follows {prev}")]
    OutOfOrder {
        index: usize,
        prev: NaiveDate,
        date: NaiveDate,
    },

    #[error("duplicate date at index {index}: {date}")]
    DuplicateDate { index: usize, date: NaiveDate },

    #[error("non-positive close {close} on {date}")]
    NonPositiveClose { date: NaiveDate, close: f64 },
}

/// Ordered daily close series for a single symbol.
///
/// Owned transiently by a pipeline run; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, enforcing the ordering and positivity invariants.
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        if points.is_empty() {
            return Err(SeriesError::Empty);
        }

        for (i, point) in points.iter().enumerate() {
            if !(point.close > 0.0) {
                return Err(SeriesError::NonPositiveClose {
                    date: point.date,
                    close: point.close,
                });
            }
            if i > 0 {
                let prev = points[i - 1].date;
                if point.date == prev {
                    return Err(SeriesError::DuplicateDate {
                        index: i,
                        date: point.date,
                    });
                }
                if point.date < prev {
                    return Err(SeriesError::OutOfOrder {
                        index: i,
                        prev,
                        date: point.date,
                    });
                }
            }
        }

        Ok(Self {
            symbol: symbol.into(),
            points,
        })
    }

    /// Build a series from bare closes, assigning consecutive weekday dates
    /// starting at `start`. Used by the synthetic provider and test fixtures.
    pub fn from_daily_closes(
        symbol: impl Into<String>,
        start: NaiveDate,
        closes: &[f64],
    ) -> Result<Self, SeriesError> {
        let mut date = start;
        let mut points = Vec::with_capacity(closes.len());
        for &close in closes {
            while matches!(date.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun) {
                date += chrono::Duration::days(1);
            }
            points.push(PricePoint { date, close });
            date += chrono::Duration::days(1);
        }
        Self::new(symbol, points)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: an empty series cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent observation. Safe: the series is non-empty by construction.
    pub fn last(&self) -> &PricePoint {
        self.points.last().expect("series is non-empty by construction")
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Deterministic BLAKE3 fingerprint over (symbol, dates, closes).
    ///
    /// Identical input data yields an identical fingerprint, so two runs over
    /// the same history can be recognized as such from their artifacts.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.symbol.as_bytes());
        for point in &self.points {
            hasher.update(point.date.to_string().as_bytes());
            hasher.update(&point.close.to_le_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_points() -> Vec<PricePoint> {
        vec![
            PricePoint {
                date: date(2024, 1, 2),
                close: 100.0,
            },
            PricePoint {
                date: date(2024, 1, 3),
                close: 101.5,
            },
            PricePoint {
                date: date(2024, 1, 4),
                close: 99.75,
            },
        ]
    }

    #[test]
    fn valid_series_constructs() {
        let series = PriceSeries::new("SPY", sample_points()).unwrap();
        assert_eq!(series.symbol(), "SPY");
        assert_eq!(series.len(), 3);
        assert_eq!(series.last().close, 99.75);
    }

    #[test]
    fn empty_series_rejected() {
        assert_eq!(
            PriceSeries::new("SPY", vec![]).unwrap_err(),
            SeriesError::Empty
        );
    }

    #[test]
    fn out_of_order_dates_rejected() {
        let mut points = sample_points();
        points.swap(1, 2);
        let err = PriceSeries::new("SPY", points).unwrap_err();
        assert!(matches!(err, SeriesError::OutOfOrder { index: 2, .. }));
    }

    #[test]
    fn duplicate_dates_rejected() {
        let mut points = sample_points();
        points[2].date = points[1].date;
        let err = PriceSeries::new("SPY", points).unwrap_err();
        assert!(matches!(err, SeriesError::DuplicateDate { index: 2, .. }));
    }

    #[test]
    fn non_positive_close_rejected() {
        let mut points = sample_points();
        points[1].close = 0.0;
        let err = PriceSeries::new("SPY", points).unwrap_err();
        assert!(matches!(err, SeriesError::NonPositiveClose { .. }));
    }

    #[test]
    fn nan_close_rejected() {
        let mut points = sample_points();
        points[0].close = f64::NAN;
        assert!(PriceSeries::new("SPY", points).is_err());
    }

    #[test]
    fn from_daily_closes_skips_weekends() {
        // 2024-01-05 is a Friday; the next point must land on Monday the 8th.
        let series =
            PriceSeries::from_daily_closes("SPY", date(2024, 1, 5), &[100.0, 101.0]).unwrap();
        assert_eq!(series.points()[0].date, date(2024, 1, 5));
        assert_eq!(series.points()[1].date, date(2024, 1, 8));
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let a = PriceSeries::new("SPY", sample_points()).unwrap();
        let b = PriceSeries::new("SPY", sample_points()).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_depends_on_symbol_and_data() {
        let a = PriceSeries::new("SPY", sample_points()).unwrap();
        let b = PriceSeries::new("QQQ", sample_points()).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());

        let mut points = sample_points();
        points[0].close = 100.01;
        let c = PriceSeries::new("SPY", points).unwrap();
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn series_serialization_roundtrip() {
        let series = PriceSeries::new("SPY", sample_points()).unwrap();
        let json = serde_json::to_string(&series).unwrap();
        let deser: PriceSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(series, deser);
    }
}
