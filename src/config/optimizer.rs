//! EMA-ratio search configuration

use {crate::domain::PeriodPair, std::ops::Range};

/// Immutable blueprint for the adaptive EMA-ratio search.
pub struct OptimizerConfig {
    /// Closes per non-overlapping window.
    pub window_size: usize,
    /// Seed pool for the very first window.
    pub initial_seeds: &'static [PeriodPair],
    /// Half-open range for random short periods.
    pub short_range: Range<i64>,
    /// Half-open range for random long periods.
    pub long_range: Range<i64>,
    /// Fresh random pairs added to the seed pool in every window.
    pub random_candidates: usize,
    /// Half-open range for the local perturbation step (-1, 0, +1).
    pub perturbation: Range<i64>,
}

pub const OPTIMIZER: OptimizerConfig = OptimizerConfig {
    window_size: 10,
    initial_seeds: &[
        PeriodPair::new(9, 21),
        PeriodPair::new(10, 30),
        PeriodPair::new(12, 26),
    ],
    short_range: 5..15,
    long_range: 20..40,
    random_candidates: 3,
    perturbation: -1..2,
};

/// Runtime copy of [`OPTIMIZER`] handed to the search, so callers (CLI flags,
/// tests) can override individual knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerSettings {
    pub window_size: usize,
    pub initial_seeds: Vec<PeriodPair>,
    pub short_range: Range<i64>,
    pub long_range: Range<i64>,
    pub random_candidates: usize,
    pub perturbation: Range<i64>,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            window_size: OPTIMIZER.window_size,
            initial_seeds: OPTIMIZER.initial_seeds.to_vec(),
            short_range: OPTIMIZER.short_range,
            long_range: OPTIMIZER.long_range,
            random_candidates: OPTIMIZER.random_candidates,
            perturbation: OPTIMIZER.perturbation,
        }
    }
}

impl OptimizerSettings {
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Restricts every window's pool to the carried seeds (no random exploration).
    pub fn without_exploration(mut self) -> Self {
        self.random_candidates = 0;
        self
    }
}
