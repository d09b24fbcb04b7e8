//! Sigwatch Core — domain types, data providers, and deviation analytics.
//!
//! This crate contains the heart of the deviation monitor:
//! - Validated daily price series domain type
//! - Data provider boundary (Yahoo Finance chart API, deterministic synthetic walk)
//! - Rolling mean/stddev engine and the current-deviation snapshot
//! - Status band classifier (Normal / Alert / Extreme)

pub mod analytics;
pub mod data;
pub mod domain;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: core types are Send + Sync.
    ///
    /// The pipeline is single-threaded today, but the provider trait is the
    /// seam a scheduler would hold across threads. If any type fails this
    /// check, the build breaks immediately.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::PricePoint>();
        require_sync::<domain::PricePoint>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();

        require_send::<analytics::RollingStats>();
        require_sync::<analytics::RollingStats>();
        require_send::<analytics::DeviationSnapshot>();
        require_sync::<analytics::DeviationSnapshot>();
        require_send::<analytics::Classification>();
        require_sync::<analytics::Classification>();

        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();
        require_send::<data::SyntheticProvider>();
        require_sync::<data::SyntheticProvider>();
    }
}
