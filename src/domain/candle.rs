use serde::{Deserialize, Serialize};

/// One daily bar as delivered by the market-data provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp_ms: i64,

    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
    /// Close adjusted for splits and dividends. Equals `close_price` when the
    /// provider has no adjustment data.
    pub adj_close_price: f64,

    pub volume: f64,
}

impl Candle {
    // A constructor for convenience
    pub fn new(timestamp_ms: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Candle {
            timestamp_ms,
            open_price: open,
            high_price: high,
            low_price: low,
            close_price: close,
            adj_close_price: close,
            volume,
        }
    }

    pub fn with_adj_close(mut self, adj_close: f64) -> Self {
        self.adj_close_price = adj_close;
        self
    }

    pub fn is_bullish(&self) -> bool {
        self.close_price > self.open_price
    }

    pub fn is_bearish(&self) -> bool {
        self.close_price < self.open_price
    }
}
