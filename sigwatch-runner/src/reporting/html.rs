//! HTML dashboard generator.
//!
//! Two page shapes: the full dashboard (status, metric cards, chart,
//! interpretation) and the degraded page written when the pipeline fails
//! upstream of rendering. Both are single self-contained files.

use sigwatch_core::analytics::{Band, Classification, DeviationSnapshot};

/// Band-specific accent color.
pub fn band_color(band: Band) -> &'static str {
    match band {
        Band::Normal => "#44ff44",
        Band::Alert => "#ff4444",
        Band::Extreme => "#ff8800",
    }
}

/// Plain-language reading of a band, shown under the metric cards.
fn band_meaning(band: Band) -> &'static str {
    match band {
        Band::Normal => "Price is within its typical range.",
        Band::Alert => "Unusual conditions: potential opportunity or risk.",
        Band::Extreme => "Very rare conditions: significant market event.",
    }
}

/// Render the full dashboard page.
pub fn render_dashboard(
    snapshot: &DeviationSnapshot,
    classification: &Classification,
    symbol: &str,
    window: usize,
    chart_markup: &str,
    generated_at: &str,
) -> String {
    let status = classification.band.label();
    let status_color = band_color(classification.band);
    let direction = format!("{:?}", classification.direction);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{symbol} Deviation Monitor</title>
    <style>
        body {{
            font-family: Arial, sans-serif;
            margin: 0;
            padding: 20px;
            background: #f5f5f5;
        }}
        .container {{
            max-width: 1200px;
            margin: 0 auto;
            background: white;
            border-radius: 10px;
            box-shadow: 0 4px 6px rgba(0,0,0,0.1);
        }}
        .header {{
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            padding: 30px;
            text-align: center;
            border-radius: 10px 10px 0 0;
        }}
        .status {{
            font-size: 1.8em;
            font-weight: bold;
            color: {status_color};
            margin: 15px 0;
        }}
        .metrics {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(250px, 1fr));
            gap: 20px;
            padding: 30px;
            background: #f8f9fa;
        }}
        .metric-card {{
            background: white;
            padding: 25px;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
            text-align: center;
        }}
        .metric-title {{
            font-size: 0.9em;
            color: #666;
            margin-bottom: 10px;
            text-transform: uppercase;
            letter-spacing: 1px;
        }}
        .metric-value {{
            font-size: 2em;
            font-weight: bold;
            color: #333;
        }}
        .chart-container {{
            padding: 30px;
            background: white;
        }}
        .chart-wrapper {{
            position: relative;
            height: 400px;
            margin: 20px 0;
        }}
        .info {{
            padding: 30px;
            background: #f8f9fa;
            line-height: 1.6;
        }}
        .footer {{
            background: #333;
            color: white;
            text-align: center;
            padding: 20px;
            border-radius: 0 0 10px 10px;
        }}
        @media (max-width: 768px) {{
            .metrics {{ grid-template-columns: 1fr; }}
            .chart-wrapper {{ height: 300px; }}
        }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{symbol} Deviation Monitor</h1>
            <div class="status">{status}</div>
            <p>Last Updated: {generated_at}</p>
        </div>

        <div class="metrics">
            <div class="metric-card">
                <div class="metric-title">Current Price</div>
                <div class="metric-value">{price:.2}</div>
            </div>
            <div class="metric-card">
                <div class="metric-title">{window}-Period Average</div>
                <div class="metric-value">{mean:.2}</div>
            </div>
            <div class="metric-card">
                <div class="metric-title">Standard Deviations</div>
                <div class="metric-value" style="color: {status_color};">{score:.2}&sigma;</div>
            </div>
            <div class="metric-card">
                <div class="metric-title">Direction</div>
                <div class="metric-value">{direction}</div>
            </div>
        </div>

        <div class="chart-container">
{chart_markup}
        </div>

        <div class="info">
            <h3>Understanding the Analysis</h3>
            <p><strong>Current Status:</strong> As of {as_of}, {symbol} is
            <strong>{magnitude:.2} standard deviations {direction_lower}</strong> its
            {window}-period moving average. {meaning}</p>

            <div style="margin: 20px 0;">
                <p><strong>Status Meanings:</strong></p>
                <ul>
                    <li><span style="color: #44ff44; font-weight: bold;">NORMAL (&lt; 2&sigma;):</span> Price within typical range</li>
                    <li><span style="color: #ff4444; font-weight: bold;">ALERT (2&ndash;3&sigma;):</span> Unusual conditions</li>
                    <li><span style="color: #ff8800; font-weight: bold;">EXTREME (&gt; 3&sigma;):</span> Very rare conditions</li>
                </ul>
            </div>
        </div>

        <div class="footer">
            <p>For informational purposes only. Not investment advice.</p>
        </div>
    </div>
</body>
</html>
"#,
        price = snapshot.price,
        mean = snapshot.mean,
        score = snapshot.score,
        magnitude = snapshot.score.abs(),
        direction_lower = classification.direction.as_str(),
        as_of = snapshot.date,
        meaning = band_meaning(classification.band),
    )
}

/// Render the degraded page: the error and when it happened, nothing else.
///
/// This page is the artifact-first guarantee: it exists even when the
/// pipeline cannot produce a single metric.
pub fn render_degraded(symbol: &str, error: &str, generated_at: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{symbol} Deviation Monitor - Error</title>
    <style>
        body {{ font-family: Arial, sans-serif; padding: 40px; text-align: center; }}
        .error {{ background: #ffe6e6; padding: 20px; border-radius: 8px; margin: 20px; }}
    </style>
</head>
<body>
    <h1>{symbol} Deviation Monitor</h1>
    <div class="error">
        <h2>Error Loading Data</h2>
        <p>Unable to complete the analysis at this time.</p>
        <p>Error: {error}</p>
        <p>Time: {generated_at}</p>
    </div>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sigwatch_core::analytics::classify;

    fn alert_snapshot() -> DeviationSnapshot {
        DeviationSnapshot {
            date: NaiveDate::from_ymd_opt(2024, 6, 28).unwrap(),
            price: 106.0,
            mean: 100.5,
            stddev: 2.0,
            score: 2.75,
        }
    }

    #[test]
    fn dashboard_carries_status_and_metrics() {
        let snapshot = alert_snapshot();
        let classification = classify(snapshot.score);
        let html = render_dashboard(
            &snapshot,
            &classification,
            "^GSPC",
            200,
            "<div>chart</div>",
            "2024-06-28 21:00:00 UTC",
        );

        assert!(html.contains("ALERT"));
        assert!(html.contains("#ff4444"));
        assert!(html.contains("106.00"));
        assert!(html.contains("100.50"));
        assert!(html.contains("2.75"));
        assert!(html.contains("Above"));
        assert!(html.contains("200-Period Average"));
        assert!(html.contains("<div>chart</div>"));
        assert!(html.contains("2024-06-28 21:00:00 UTC"));
    }

    #[test]
    fn normal_band_is_green() {
        let mut snapshot = alert_snapshot();
        snapshot.score = 0.5;
        let classification = classify(snapshot.score);
        let html = render_dashboard(&snapshot, &classification, "^GSPC", 200, "", "now");
        assert!(html.contains("NORMAL"));
        assert!(html.contains(r#"color: #44ff44;"#));
    }

    #[test]
    fn degraded_page_reports_error_and_time() {
        let html = render_degraded(
            "^GSPC",
            "no data returned for symbol '^GSPC'",
            "2024-06-28 21:00:00 UTC",
        );
        assert!(html.contains("Error Loading Data"));
        assert!(html.contains("no data returned"));
        assert!(html.contains("2024-06-28 21:00:00 UTC"));
        // Degraded page never claims a status band.
        assert!(!html.contains("ALERT"));
    }
}
