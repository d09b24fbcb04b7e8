//! Data provider trait and structured error types.
//!
//! The `PriceProvider` trait abstracts over data sources (Yahoo Finance,
//! synthetic walk) so the pipeline can swap implementations and mock for
//! tests. Providers make exactly one attempt per fetch; a failed request is
//! fatal for the run, by design of the monitor.

use crate::domain::PriceSeries;
use chrono::NaiveDate;
use thiserror::Error;

/// Structured error types for data retrieval.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure: unreachable host, timeout, non-success status.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The provider answered but returned no usable rows.
    #[error("no data returned for symbol '{symbol}'")]
    NoData { symbol: String },

    /// The provider answered with a payload we could not understand.
    #[error("provider response not understood: {0}")]
    BadResponse(String),
}

/// Trait for daily price sources.
///
/// Implementations return a validated [`PriceSeries`] covering at most
/// `start..=end`; rows with a missing close are dropped before validation.
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily closes for a symbol over a calendar date range.
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FetchError>;
}
