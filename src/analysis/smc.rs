//! Smart-money-concept chart annotations: fair value gaps and swing points.

use {
    crate::domain::Candle,
    serde::Serialize,
    strum_macros::Display,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum GapDirection {
    Bullish,
    Bearish,
}

/// Three-candle imbalance centred on `index`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FairValueGap {
    pub index: usize,
    pub direction: GapDirection,
    pub top: f64,
    pub bottom: f64,
    /// First later candle (from `index + 2`) that trades back into the gap.
    pub mitigated_index: Option<usize>,
}

impl FairValueGap {
    /// Right edge of the gap's rectangle: its mitigation, or the last candle if still open.
    pub fn extends_to(&self, candle_count: usize) -> usize {
        self.mitigated_index
            .unwrap_or_else(|| candle_count.saturating_sub(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum SwingKind {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwingPoint {
    pub index: usize,
    pub kind: SwingKind,
    pub level: f64,
}

/// Bullish gap: the candle before tops out below the candle after's low, on an
/// up candle. Bearish gap: mirror image on a down candle.
pub fn fair_value_gaps(candles: &[Candle]) -> Vec<FairValueGap> {
    if candles.len() < 3 {
        return Vec::new();
    }

    (1..candles.len() - 1)
        .filter_map(|i| {
            let (prev, cur, next) = (&candles[i - 1], &candles[i], &candles[i + 1]);
            let (direction, top, bottom) =
                if prev.high_price < next.low_price && cur.is_bullish() {
                    (GapDirection::Bullish, next.low_price, prev.high_price)
                } else if prev.low_price > next.high_price && cur.is_bearish() {
                    (GapDirection::Bearish, prev.low_price, next.high_price)
                } else {
                    return None;
                };

            let mitigated_index = candles
                .iter()
                .enumerate()
                .skip(i + 2)
                .find(|(_, c)| match direction {
                    GapDirection::Bullish => c.low_price <= top,
                    GapDirection::Bearish => c.high_price >= bottom,
                })
                .map(|(j, _)| j);

            Some(FairValueGap {
                index: i,
                direction,
                top,
                bottom,
                mitigated_index,
            })
        })
        .collect()
}

/// Swing highs and lows over a centred window of `2 * swing_length` candles.
///
/// Candle `i` is a swing high when its high is the maximum of
/// `[i − n + 1, i + n]`, a swing low symmetrically (high wins if both hold).
/// The window must fit inside the series. Runs of the same kind collapse to
/// the most extreme point, so the result alternates high/low.
pub fn swing_highs_lows(candles: &[Candle], swing_length: usize) -> Vec<SwingPoint> {
    let n = swing_length.max(1);
    if candles.len() < 2 * n {
        return Vec::new();
    }

    let raw = (n - 1..candles.len() - n).filter_map(|i| {
        let window = &candles[i + 1 - n..=i + n];
        let cur = &candles[i];
        if window.iter().all(|c| c.high_price <= cur.high_price) {
            Some(SwingPoint {
                index: i,
                kind: SwingKind::High,
                level: cur.high_price,
            })
        } else if window.iter().all(|c| c.low_price >= cur.low_price) {
            Some(SwingPoint {
                index: i,
                kind: SwingKind::Low,
                level: cur.low_price,
            })
        } else {
            None
        }
    });

    raw.fold(Vec::new(), |mut swings: Vec<SwingPoint>, point| {
        match swings.last_mut() {
            Some(last) if last.kind == point.kind => {
                let more_extreme = match point.kind {
                    SwingKind::High => point.level > last.level,
                    SwingKind::Low => point.level < last.level,
                };
                if more_extreme {
                    *last = point;
                }
            }
            _ => swings.push(point),
        }
        swings
    })
}
