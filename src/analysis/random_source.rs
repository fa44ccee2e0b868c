use {
    rand::{Rng, SeedableRng, rngs::StdRng},
    std::ops::Range,
};

/// Source of uniform integer draws for the EMA-ratio search.
///
/// Injected so that tests (and reproducible CLI runs) can pin the candidate
/// pools. Implementations must return a value inside `range` (half-open);
/// scripted test sources may ignore the range to force degenerate pools.
pub trait RandomSource {
    fn draw(&mut self, range: Range<i64>) -> i64;
}

/// Adapts any `rand` generator.
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn draw(&mut self, range: Range<i64>) -> i64 {
        if range.is_empty() {
            return range.start;
        }
        self.0.gen_range(range)
    }
}

impl RngSource<StdRng> {
    /// Non-deterministic across runs.
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// Replays a fixed list of draws in order, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<i64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: Vec<i64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// How many values have been handed out so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn draw(&mut self, range: Range<i64>) -> i64 {
        if self.values.is_empty() {
            return range.start;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
