use {
    crate::domain::Candle,
    serde::{Deserialize, Serialize},
    std::{error::Error, fmt},
};

/// Ordered (timestamp, close) pairs with strictly increasing timestamps.
///
/// Stored column-wise so the optimizer can hand contiguous close slices to the
/// signal generator without copying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    timestamps: Vec<i64>,
    closes: Vec<f64>,
}

#[derive(Debug, PartialEq)]
pub enum SeriesError {
    LengthMismatch { timestamps: usize, closes: usize },
    NotIncreasing { index: usize },
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SeriesError::LengthMismatch { timestamps, closes } => write!(
                f,
                "Series length mismatch: {} timestamps vs {} closes",
                timestamps, closes
            ),
            SeriesError::NotIncreasing { index } => write!(
                f,
                "Timestamps must be strictly increasing (violated at index {})",
                index
            ),
        }
    }
}

impl Error for SeriesError {}

impl PriceSeries {
    pub fn new(timestamps: Vec<i64>, closes: Vec<f64>) -> Result<Self, SeriesError> {
        if timestamps.len() != closes.len() {
            return Err(SeriesError::LengthMismatch {
                timestamps: timestamps.len(),
                closes: closes.len(),
            });
        }
        if let Some(pos) = timestamps.windows(2).position(|w| w[0] >= w[1]) {
            return Err(SeriesError::NotIncreasing { index: pos + 1 });
        }
        Ok(Self { timestamps, closes })
    }

    /// Builds a series from provider candles, taking either the adjusted or the raw close.
    pub fn from_candles(candles: &[Candle], use_adjusted: bool) -> Result<Self, SeriesError> {
        let (timestamps, closes) = candles
            .iter()
            .map(|c| {
                let close = if use_adjusted {
                    c.adj_close_price
                } else {
                    c.close_price
                };
                (c.timestamp_ms, close)
            })
            .unzip();
        Self::new(timestamps, closes)
    }

    /// Convenience for tests and synthetic data: timestamps are the indices.
    pub fn from_closes(closes: Vec<f64>) -> Self {
        let timestamps = (0..closes.len() as i64).collect();
        Self { timestamps, closes }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    /// Non-overlapping, contiguous windows of exactly `size` closes, tagged with
    /// their start index. A trailing remainder shorter than `size` is not yielded.
    pub fn windows(&self, size: usize) -> impl Iterator<Item = (usize, &[f64])> {
        // chunks_exact panics on 0
        let size = size.max(1);
        self.closes
            .chunks_exact(size)
            .enumerate()
            .map(move |(n, chunk)| (n * size, chunk))
    }
}
