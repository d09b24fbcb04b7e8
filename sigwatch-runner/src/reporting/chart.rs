//! Chart rendering boundary.
//!
//! The dashboard treats charting as an external collaborator: it hands over
//! aligned date/price/mean series and embeds whatever markup comes back. The
//! shipped backend emits a self-contained Chart.js block; a backend that can
//! produce static images can additionally return PNG bytes, which the
//! pipeline writes as a best-effort artifact.

use chrono::NaiveDate;
use sigwatch_core::analytics::RollingStats;
use sigwatch_core::domain::PriceSeries;
use thiserror::Error;

/// Errors from chart rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("chart markup generation failed: {0}")]
    Markup(String),

    #[error("chart image generation failed: {0}")]
    Image(String),
}

/// Aligned series handed to a chart backend: one date label per row, with
/// price and rolling mean both defined at every index.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<f64>,
    pub means: Vec<f64>,
}

impl ChartSeries {
    /// Trim a series and its rolling stats to the last `sessions` rows where
    /// the rolling mean is defined.
    ///
    /// `rolling` must have been computed from `series`.
    pub fn tail(series: &PriceSeries, rolling: &RollingStats, sessions: usize) -> Self {
        let points = series.points();
        let means = rolling.means();
        assert_eq!(points.len(), means.len(), "rolling stats not aligned to series");

        // First index where the rolling mean exists.
        let first_defined = rolling.window().saturating_sub(1);
        let start = points.len().saturating_sub(sessions).max(first_defined);

        let mut dates = Vec::with_capacity(points.len() - start);
        let mut prices = Vec::with_capacity(points.len() - start);
        let mut mean_values = Vec::with_capacity(points.len() - start);
        for i in start..points.len() {
            dates.push(points[i].date);
            prices.push(points[i].close);
            mean_values.push(means[i]);
        }

        Self {
            dates,
            prices,
            means: mean_values,
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Trait for chart backends.
pub trait ChartRenderer {
    /// Human-readable name of this backend.
    fn name(&self) -> &str;

    /// Produce embeddable HTML markup for the price-vs-mean chart.
    fn render_markup(&self, series: &ChartSeries, window: usize) -> Result<String, RenderError>;

    /// Produce a static PNG of the chart, if this backend supports images.
    ///
    /// The default backend does not; `Ok(None)` means "no image artifact",
    /// not failure.
    fn render_image(&self, _series: &ChartSeries, _window: usize) -> Result<Option<Vec<u8>>, RenderError> {
        Ok(None)
    }
}

/// Placeholder block embedded when the chart backend fails. The dashboard
/// still ships; only the chart area reports the problem.
pub fn unavailable_markup(reason: &str) -> String {
    format!(
        r#"<div style="text-align: center; padding: 50px; background: #f8f9fa; border-radius: 8px;">
    <h3>Chart Unavailable</h3>
    <p>{reason}</p>
</div>"#
    )
}

/// Chart.js backend: emits a `<canvas>` plus a script block that draws the
/// price and rolling-mean lines. Self-contained apart from the CDN script
/// tag, so the dashboard stays a single static file.
pub struct ChartJsRenderer;

impl ChartRenderer for ChartJsRenderer {
    fn name(&self) -> &str {
        "chartjs"
    }

    fn render_markup(&self, series: &ChartSeries, window: usize) -> Result<String, RenderError> {
        let labels: Vec<String> = series
            .dates
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect();

        let labels_json =
            serde_json::to_string(&labels).map_err(|e| RenderError::Markup(e.to_string()))?;
        let prices_json =
            serde_json::to_string(&series.prices).map_err(|e| RenderError::Markup(e.to_string()))?;
        let means_json =
            serde_json::to_string(&series.means).map_err(|e| RenderError::Markup(e.to_string()))?;

        Ok(format!(
            r#"<h2>Price vs {window}-Period Moving Average (Last {sessions} Sessions)</h2>
<div class="chart-wrapper">
    <canvas id="priceChart"></canvas>
</div>
<script src="https://cdnjs.cloudflare.com/ajax/libs/Chart.js/3.9.1/chart.min.js"></script>
<script>
    const ctx = document.getElementById('priceChart').getContext('2d');
    new Chart(ctx, {{
        type: 'line',
        data: {{
            labels: {labels_json},
            datasets: [{{
                label: 'Close',
                data: {prices_json},
                borderColor: '#000000',
                backgroundColor: 'rgba(0,0,0,0.1)',
                borderWidth: 2,
                tension: 0,
                pointRadius: 3
            }}, {{
                label: '{window}-Period Moving Average',
                data: {means_json},
                borderColor: '#2563eb',
                backgroundColor: 'rgba(37,99,235,0.1)',
                borderWidth: 2,
                tension: 0,
                pointRadius: 2
            }}]
        }},
        options: {{
            responsive: true,
            maintainAspectRatio: false,
            scales: {{
                y: {{
                    beginAtZero: false,
                    title: {{ display: true, text: 'Price' }}
                }},
                x: {{
                    title: {{ display: true, text: 'Date' }}
                }}
            }},
            plugins: {{
                legend: {{ display: true, position: 'top' }},
                tooltip: {{ mode: 'index', intersect: false }}
            }}
        }}
    }});
</script>"#,
            sessions = series.len(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigwatch_core::analytics::RollingStats;
    use sigwatch_core::domain::PriceSeries;

    fn fixture(n: usize, window: usize) -> (PriceSeries, RollingStats) {
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + (i % 7) as f64).collect();
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let series = PriceSeries::from_daily_closes("TEST", start, &closes).unwrap();
        let rolling = RollingStats::compute(&series, window).unwrap();
        (series, rolling)
    }

    #[test]
    fn tail_respects_session_count() {
        let (series, rolling) = fixture(120, 20);
        let chart = ChartSeries::tail(&series, &rolling, 30);
        assert_eq!(chart.len(), 30);
        assert_eq!(chart.dates.last(), Some(&series.last().date));
        assert!(chart.means.iter().all(|m| !m.is_nan()));
    }

    #[test]
    fn tail_never_reaches_into_undefined_region() {
        // Only 5 rows have a defined mean; asking for 30 sessions must clamp.
        let (series, rolling) = fixture(24, 20);
        let chart = ChartSeries::tail(&series, &rolling, 30);
        assert_eq!(chart.len(), 5);
        assert!(chart.means.iter().all(|m| !m.is_nan()));
    }

    #[test]
    fn markup_embeds_both_series() {
        let (series, rolling) = fixture(60, 20);
        let chart = ChartSeries::tail(&series, &rolling, 30);
        let markup = ChartJsRenderer.render_markup(&chart, 20).unwrap();

        assert!(markup.contains("priceChart"));
        assert!(markup.contains("20-Period Moving Average"));
        assert!(markup.contains("2024-"));
        // Two datasets: close and mean.
        assert_eq!(markup.matches("borderColor").count(), 2);
    }

    #[test]
    fn default_backend_has_no_image() {
        let (series, rolling) = fixture(60, 20);
        let chart = ChartSeries::tail(&series, &rolling, 30);
        assert!(ChartJsRenderer.render_image(&chart, 20).unwrap().is_none());
    }

    #[test]
    fn unavailable_markup_carries_reason() {
        let markup = unavailable_markup("backend exploded");
        assert!(markup.contains("Chart Unavailable"));
        assert!(markup.contains("backend exploded"));
    }
}
