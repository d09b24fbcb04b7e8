//! Deviation analytics: rolling statistics, current snapshot, band classifier.

pub mod classify;
pub mod rolling;
pub mod snapshot;

pub use classify::{classify, Band, Classification, Direction};
pub use rolling::{AnalyticsError, RollingStats};
pub use snapshot::DeviationSnapshot;

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for analytics tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
