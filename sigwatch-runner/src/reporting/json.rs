//! JSON snapshot artifact.
//!
//! The machine-readable counterpart of the dashboard, written only on
//! successful runs. Field names are part of the artifact contract; consumers
//! poll this file between runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sigwatch_core::analytics::{Band, Classification, DeviationSnapshot};

/// Snapshot record as persisted to `data.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// Wall-clock time of the run, ISO-8601. The only field that differs
    /// between runs over identical input data.
    pub timestamp: String,
    pub symbol: String,
    /// Date of the last session in the series.
    pub as_of: NaiveDate,
    /// Rolling window length in trading periods.
    pub window: usize,
    pub current_price: f64,
    /// Rolling mean at the last session.
    pub ma: f64,
    /// Rolling sample standard deviation at the last session.
    pub std: f64,
    /// Standard deviations from the mean: (current_price - ma) / std.
    pub std_away: f64,
    pub status_label: String,
    pub direction: String,
    /// True iff the band is Alert (2-3 sigma inclusive).
    pub alert: bool,
    /// BLAKE3 fingerprint of the input series, for idempotence checks.
    pub series_fingerprint: String,
}

impl SnapshotRecord {
    pub fn new(
        snapshot: &DeviationSnapshot,
        classification: &Classification,
        symbol: &str,
        window: usize,
        timestamp: String,
        series_fingerprint: String,
    ) -> Self {
        Self {
            timestamp,
            symbol: symbol.to_string(),
            as_of: snapshot.date,
            window,
            current_price: snapshot.price,
            ma: snapshot.mean,
            std: snapshot.stddev,
            std_away: snapshot.score,
            status_label: classification.band.label().to_string(),
            direction: classification.direction.as_str().to_string(),
            alert: classification.band == Band::Alert,
            series_fingerprint,
        }
    }

    /// Serialize for the artifact file.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigwatch_core::analytics::classify;

    fn record(score: f64) -> SnapshotRecord {
        let snapshot = DeviationSnapshot {
            date: NaiveDate::from_ymd_opt(2024, 6, 28).unwrap(),
            price: 100.5 + score * 2.0,
            mean: 100.5,
            stddev: 2.0,
            score,
        };
        SnapshotRecord::new(
            &snapshot,
            &classify(score),
            "^GSPC",
            200,
            "2024-06-28T21:00:00+00:00".to_string(),
            "abc123".to_string(),
        )
    }

    #[test]
    fn roundtrip_preserves_numbers_and_alert() {
        let original = record(2.75);
        let json = original.to_json().unwrap();
        let parsed: SnapshotRecord = serde_json::from_str(&json).unwrap();

        assert!((parsed.current_price - original.current_price).abs() < 1e-9);
        assert!((parsed.ma - original.ma).abs() < 1e-9);
        assert!((parsed.std - original.std).abs() < 1e-9);
        assert!((parsed.std_away - original.std_away).abs() < 1e-9);
        assert_eq!(parsed.alert, original.alert);
        assert_eq!(parsed, original);
    }

    #[test]
    fn alert_flag_tracks_band() {
        assert!(record(2.0).alert);
        assert!(record(-2.5).alert);
        assert!(record(3.0).alert);
        assert!(!record(1.5).alert);
        assert!(!record(3.5).alert);
    }

    #[test]
    fn labels_and_direction_are_strings() {
        let r = record(-2.5);
        assert_eq!(r.status_label, "ALERT");
        assert_eq!(r.direction, "below");

        let r = record(3.5);
        assert_eq!(r.status_label, "EXTREME");
        assert_eq!(r.direction, "above");
    }

    #[test]
    fn json_uses_contract_field_names() {
        let json = record(1.0).to_json().unwrap();
        for key in [
            "\"timestamp\"",
            "\"current_price\"",
            "\"ma\"",
            "\"std\"",
            "\"std_away\"",
            "\"status_label\"",
            "\"direction\"",
            "\"alert\"",
        ] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
    }
}
