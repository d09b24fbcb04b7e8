//! Domain types shared across the pipeline.

mod series;

pub use series::{PricePoint, PriceSeries, SeriesError};
