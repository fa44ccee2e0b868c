//! Ratio sequence builder: per-window winners reduced to `short / long` scalars.

use {
    crate::{analysis::WindowResult, domain::PeriodPair},
    serde::Serialize,
};

/// `short / long` per pair, same length and order as the input.
pub fn to_decimal_ratios(pairs: &[PeriodPair]) -> Vec<f64> {
    pairs.iter().map(PeriodPair::ratio).collect()
}

/// Chart-ready ratio series: the scalar ratios plus the source pairs for hover labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioSequence {
    pub pairs: Vec<PeriodPair>,
    pub ratios: Vec<f64>,
    pub labels: Vec<String>,
    /// First close index of each window, aligned with `ratios`.
    pub window_starts: Vec<usize>,
}

impl RatioSequence {
    pub fn from_windows(windows: &[WindowResult]) -> Self {
        let pairs: Vec<PeriodPair> = windows.iter().map(|w| w.pair).collect();
        Self {
            ratios: to_decimal_ratios(&pairs),
            labels: pairs.iter().map(|p| format!("Ratio: {}", p.label())).collect(),
            window_starts: windows.iter().map(|w| w.start).collect(),
            pairs,
        }
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }
}
