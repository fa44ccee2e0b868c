// Domain types and value objects
mod candle;
mod period_pair;
mod price_series;

// Re-export commonly used types to the world
pub use candle::Candle;
pub use period_pair::PeriodPair;
pub use price_series::{PriceSeries, SeriesError};
