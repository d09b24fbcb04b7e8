//! Deterministic synthetic price provider.
//!
//! Produces a seeded random walk on weekdays: a development and offline
//! fallback selected explicitly from the CLI. The seed derives from the
//! symbol, so the same symbol always yields the same series and results are
//! reproducible across machines.

use super::provider::{FetchError, PriceProvider};
use crate::domain::{PricePoint, PriceSeries};
use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Synthetic price provider: deterministic weekday random walk from 100.0.
pub struct SyntheticProvider;

impl SyntheticProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FetchError> {
        let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
        let mut rng = StdRng::from_seed(seed);

        let mut points = Vec::new();
        let mut price = 100.0_f64;
        let mut current = start;

        while current <= end {
            let weekday = current.weekday();
            if weekday == chrono::Weekday::Sat || weekday == chrono::Weekday::Sun {
                current += chrono::Duration::days(1);
                continue;
            }

            let daily_return: f64 = rng.gen_range(-0.03..0.03);
            price *= 1.0 + daily_return;
            points.push(PricePoint {
                date: current,
                close: price,
            });
            current += chrono::Duration::days(1);
        }

        if points.is_empty() {
            return Err(FetchError::NoData {
                symbol: symbol.to_string(),
            });
        }

        PriceSeries::new(symbol, points).map_err(|e| FetchError::BadResponse(e.to_string()))
    }
}
