//! Status band classifier.
//!
//! Pure function of the deviation score: no hysteresis, no smoothing. A
//! score oscillating around a boundary flips bands between runs; that is
//! accepted behavior for a stateless monitor.

use serde::{Deserialize, Serialize};

/// Severity band over |score|. Both boundary values belong to Alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Band {
    /// |score| < 2: price within typical range.
    Normal,
    /// 2 <= |score| <= 3: unusual conditions worth attention.
    Alert,
    /// |score| > 3: very rare conditions.
    Extreme,
}

impl Band {
    /// Uppercase label used in reports and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Band::Normal => "NORMAL",
            Band::Alert => "ALERT",
            Band::Extreme => "EXTREME",
        }
    }
}

/// Which side of the mean the price sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Above,
    Below,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Above => "above",
            Direction::Below => "below",
        }
    }
}

/// Band plus direction, derived fresh each run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub band: Band,
    pub direction: Direction,
}

/// Classify a deviation score into a band and direction.
pub fn classify(score: f64) -> Classification {
    let magnitude = score.abs();

    let band = if magnitude < 2.0 {
        Band::Normal
    } else if magnitude <= 3.0 {
        Band::Alert
    } else {
        Band::Extreme
    };

    let direction = if score > 0.0 {
        Direction::Above
    } else {
        Direction::Below
    };

    Classification { band, direction }
}
