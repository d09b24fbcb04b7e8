//! Data layer: the provider boundary and its implementations.

pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use provider::{FetchError, PriceProvider};
pub use synthetic::SyntheticProvider;
pub use yahoo::YahooProvider;
