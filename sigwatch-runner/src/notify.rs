//! Inert alert notification hook.
//!
//! When a run lands in the Alert band, the pipeline formats a plain-text
//! message and hands it to an [`AlertSink`]. The default sink logs it and
//! nothing else; wiring a real delivery channel (webhook, mail) means
//! implementing the trait, not changing the pipeline.

use sigwatch_core::analytics::{Classification, DeviationSnapshot};

/// Delivery seam for alert messages.
pub trait AlertSink {
    /// Human-readable name of this sink.
    fn name(&self) -> &str;

    /// Deliver an alert message. Best-effort; the pipeline ignores failures.
    fn deliver(&self, message: &str);
}

/// Default sink: prints the alert to stdout.
pub struct LogSink;

impl AlertSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    fn deliver(&self, message: &str) {
        println!("ALERT NOTIFICATION:\n{message}");
    }
}

/// Format the plain-text alert message.
pub fn format_alert(
    snapshot: &DeviationSnapshot,
    classification: &Classification,
    symbol: &str,
    window: usize,
) -> String {
    format!(
        "{symbol} ALERT\n\
         Price: {price:.2}\n\
         {window}-period MA: {mean:.2}\n\
         Standard deviations: {score:.2}\n\
         Direction: {direction} average\n\
         Date: {date}",
        price = snapshot.price,
        mean = snapshot.mean,
        score = snapshot.score,
        direction = classification.direction.as_str(),
        date = snapshot.date,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sigwatch_core::analytics::classify;

    #[test]
    fn alert_message_carries_all_fields() {
        let snapshot = DeviationSnapshot {
            date: NaiveDate::from_ymd_opt(2024, 6, 28).unwrap(),
            price: 106.0,
            mean: 100.5,
            stddev: 2.0,
            score: 2.75,
        };
        let message = format_alert(&snapshot, &classify(snapshot.score), "^GSPC", 200);

        assert!(message.contains("^GSPC ALERT"));
        assert!(message.contains("106.00"));
        assert!(message.contains("100.50"));
        assert!(message.contains("2.75"));
        assert!(message.contains("above average"));
        assert!(message.contains("2024-06-28"));
    }
}
