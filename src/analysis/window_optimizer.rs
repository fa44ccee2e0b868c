//! Adaptive EMA-ratio search.
//!
//! # Approach
//! The close history is cut into non-overlapping windows of `window_size`
//! closes (a trailing partial window is never evaluated). Each window scores a
//! small pool of [`PeriodPair`]s with [`score_pair`] and keeps the strict
//! maximum. The winner seeds the next window's pool together with a local
//! perturbation of itself and one fresh random pair, which gives a simple
//! hill-climb with restarts.
//!
//! The seed pool is threaded through the window scan as an explicit fold
//! accumulator, so windows are inherently sequential: window `i + 1` cannot be
//! scored before window `i` has picked its winner.

#[cfg(debug_assertions)]
use crate::config::DF;
use {
    crate::{
        analysis::{RandomSource, score_pair},
        config::OptimizerSettings,
        domain::{PeriodPair, PriceSeries},
    },
    serde::Serialize,
};

// ─── Types ────────────────────────────────────────────────────────────────────

/// One candidate and its backtested return (`None` = undefined, never wins).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateScore {
    pub pair: PeriodPair,
    pub realized_return: Option<f64>,
}

/// Best pair of one window. Created once all candidates are scored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowResult {
    /// Index of the first close of the window in the full series.
    pub start: usize,
    pub pair: PeriodPair,
    pub realized_return: f64,
}

/// Pairs carried from one window into the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPool(Vec<PeriodPair>);

impl SeedPool {
    pub fn new(pairs: Vec<PeriodPair>) -> Self {
        Self(pairs)
    }

    pub fn pairs(&self) -> &[PeriodPair] {
        &self.0
    }
}

/// Outcome of scoring one window: the optional winner and the pool for the next one.
#[derive(Debug, Clone)]
pub struct WindowStep {
    pub result: Option<WindowResult>,
    pub next_seeds: SeedPool,
    pub scores: Vec<CandidateScore>,
}

// ─── Main entry points ────────────────────────────────────────────────────────

/// Best period pair per window with the default search settings and the given
/// window size.
pub fn find_best_ratios(
    series: &PriceSeries,
    window_size: usize,
    rng: &mut dyn RandomSource,
) -> Vec<PeriodPair> {
    let settings = OptimizerSettings::default().with_window_size(window_size);
    find_best_windows(series, &settings, rng)
        .into_iter()
        .map(|w| w.pair)
        .collect()
}

/// Runs the windowed search and returns one [`WindowResult`] per window that
/// produced a winner, in chronological order.
///
/// Never fails: windows without any scoreable candidate are skipped, and a
/// series shorter than one window (or a zero window size) yields nothing.
pub fn find_best_windows(
    series: &PriceSeries,
    settings: &OptimizerSettings,
    rng: &mut dyn RandomSource,
) -> Vec<WindowResult> {
    if settings.window_size == 0 || series.len() < settings.window_size {
        return Vec::new();
    }

    let initial = SeedPool::new(settings.initial_seeds.clone());

    let (_, results) = crate::trace_time!("EMA ratio search", 50, per series.len() / settings.window_size, {
        series.windows(settings.window_size).fold(
            (initial, Vec::new()),
            |(seeds, mut results), (start, window)| {
                let step = evaluate_window(start, window, seeds, settings, rng);
                results.extend(step.result);
                (step.next_seeds, results)
            },
        )
    });

    results
}

/// Scores one window against `seeds` plus fresh random candidates and decides
/// the pool carried into the next window.
pub fn evaluate_window(
    start: usize,
    window: &[f64],
    seeds: SeedPool,
    settings: &OptimizerSettings,
    rng: &mut dyn RandomSource,
) -> WindowStep {
    let candidates = candidate_pool(&seeds, settings, rng);
    let scores = score_candidates(window, &candidates);

    let Some(best) = select_best(&scores) else {
        #[cfg(debug_assertions)]
        if DF.log_windows {
            log::info!(
                "Window {} to {}: no scoreable candidate, keeping seeds {:?}",
                start,
                start + window.len(),
                seeds.pairs()
            );
        }
        return WindowStep {
            result: None,
            next_seeds: seeds,
            scores,
        };
    };

    // select_best only yields defined scores
    let realized_return = best.realized_return.unwrap_or(f64::NEG_INFINITY);
    let next_seeds = reseed(best.pair, settings, rng);

    #[cfg(debug_assertions)]
    if DF.log_windows {
        log::info!(
            "Window {} to {}: best {} return={:.5} | next seeds {:?}",
            start,
            start + window.len(),
            best.pair,
            realized_return,
            next_seeds.pairs()
        );
    }

    WindowStep {
        result: Some(WindowResult {
            start,
            pair: best.pair,
            realized_return,
        }),
        next_seeds,
        scores,
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Seed pairs followed by `random_candidates` fresh pairs (short drawn before long).
pub fn candidate_pool(
    seeds: &SeedPool,
    settings: &OptimizerSettings,
    rng: &mut dyn RandomSource,
) -> Vec<PeriodPair> {
    let mut pool = seeds.pairs().to_vec();
    pool.extend((0..settings.random_candidates).map(|_| random_pair(settings, rng)));
    pool
}

/// Scores every valid candidate on `window`. Pairs with `short >= long` are
/// dropped without being scored.
pub fn score_candidates(window: &[f64], candidates: &[PeriodPair]) -> Vec<CandidateScore> {
    candidates
        .iter()
        .filter(|pair| pair.is_valid())
        .map(|&pair| {
            let realized_return = score_pair(window, pair.short, pair.long);

            #[cfg(debug_assertions)]
            if DF.log_candidates {
                log::info!("  Ratio: {} Profit: {:?}", pair, realized_return);
            }

            CandidateScore {
                pair,
                realized_return,
            }
        })
        .collect()
}

/// Strict maximum over defined scores; the first candidate wins a tie.
pub fn select_best(scores: &[CandidateScore]) -> Option<CandidateScore> {
    scores
        .iter()
        .filter(|s| s.realized_return.is_some())
        .fold(None, |best: Option<CandidateScore>, candidate| match best {
            Some(b) if candidate.realized_return <= b.realized_return => Some(b),
            _ => Some(*candidate),
        })
}

/// Next window's pool: the winner, a ±1 perturbation of it, and a fresh random pair.
pub fn reseed(
    winner: PeriodPair,
    settings: &OptimizerSettings,
    rng: &mut dyn RandomSource,
) -> SeedPool {
    let delta_short = rng.draw(settings.perturbation.clone());
    let delta_long = rng.draw(settings.perturbation.clone());
    let perturbed = PeriodPair::new(
        to_period((winner.short as i64 + delta_short).max(1)),
        to_period((winner.long as i64 + delta_long).max(1)),
    );
    let fresh = random_pair(settings, rng);
    SeedPool::new(vec![winner, perturbed, fresh])
}

fn random_pair(settings: &OptimizerSettings, rng: &mut dyn RandomSource) -> PeriodPair {
    let short = rng.draw(settings.short_range.clone());
    let long = rng.draw(settings.long_range.clone());
    PeriodPair::new(to_period(short), to_period(long))
}

fn to_period(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ScriptedSource;

    const V_SHAPE: [f64; 10] = [
        100.0, 95.0, 90.0, 85.0, 90.0, 95.0, 100.0, 105.0, 110.0, 115.0,
    ];

    fn pairs(raw: &[(u32, u32)]) -> Vec<PeriodPair> {
        raw.iter().map(|&p| PeriodPair::from(p)).collect()
    }

    #[test]
    fn pool_is_seeds_then_random_pairs_in_draw_order() {
        let settings = OptimizerSettings::default();
        let seeds = SeedPool::new(settings.initial_seeds.clone());
        let mut rng = ScriptedSource::new(vec![5, 20, 14, 39, 13, 38]);
        let pool = candidate_pool(&seeds, &settings, &mut rng);
        assert_eq!(
            pool,
            pairs(&[(9, 21), (10, 30), (12, 26), (5, 20), (14, 39), (13, 38)])
        );
    }

    #[test]
    fn invalid_pairs_are_never_scored() {
        let scores = score_candidates(&V_SHAPE, &pairs(&[(21, 9), (9, 21), (20, 20)]));
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].pair, PeriodPair::new(9, 21));
    }

    #[test]
    fn select_best_skips_undefined_and_keeps_first_on_tie() {
        let a = CandidateScore {
            pair: PeriodPair::new(1, 2),
            realized_return: None,
        };
        let b = CandidateScore {
            pair: PeriodPair::new(2, 3),
            realized_return: Some(0.1),
        };
        let c = CandidateScore {
            pair: PeriodPair::new(3, 4),
            realized_return: Some(0.1),
        };
        let d = CandidateScore {
            pair: PeriodPair::new(4, 5),
            realized_return: Some(-0.2),
        };
        assert_eq!(select_best(&[a, b, c, d]).map(|s| s.pair), Some(b.pair));
        assert_eq!(select_best(&[a]), None);
        assert_eq!(select_best(&[]), None);
    }

    #[test]
    fn random_pair_beats_seeds_and_reseeds_around_it() {
        let settings = OptimizerSettings::default();
        let seeds = SeedPool::new(settings.initial_seeds.clone());
        // Window draws: (5,20) (14,39) (13,38); reseed draws: +1, -1, then (7,25)
        let mut rng = ScriptedSource::new(vec![5, 20, 14, 39, 13, 38, 1, -1, 7, 25]);

        let step = evaluate_window(0, &V_SHAPE, seeds, &settings, &mut rng);

        let result = step.result.unwrap();
        assert_eq!(result.pair, PeriodPair::new(5, 20));
        assert!((result.realized_return - -0.015749936338171636).abs() < 1e-12);
        assert_eq!(step.scores.len(), 6);
        assert_eq!(
            step.next_seeds.pairs(),
            pairs(&[(5, 20), (6, 19), (7, 25)]).as_slice()
        );
        assert_eq!(rng.draws(), 10);
    }

    #[test]
    fn perturbation_is_floored_at_one() {
        let settings = OptimizerSettings::default();
        let mut rng = ScriptedSource::new(vec![-1, -1, 5, 20]);
        let next = reseed(PeriodPair::new(1, 2), &settings, &mut rng);
        assert_eq!(next.pairs()[1], PeriodPair::new(1, 1));
    }

    #[test]
    fn all_invalid_window_keeps_seed_pool_unchanged() {
        let settings = OptimizerSettings {
            initial_seeds: pairs(&[(30, 20), (21, 21)]),
            ..OptimizerSettings::default()
        };
        let seeds = SeedPool::new(settings.initial_seeds.clone());
        // Every random pair comes out as (25, 20): short >= long
        let mut rng = ScriptedSource::new(vec![25, 20]);

        let step = evaluate_window(0, &V_SHAPE, seeds.clone(), &settings, &mut rng);

        assert!(step.result.is_none());
        assert!(step.scores.is_empty());
        assert_eq!(step.next_seeds, seeds);
    }

    #[test]
    fn skipped_window_does_not_consume_reseed_draws() {
        let settings = OptimizerSettings {
            initial_seeds: pairs(&[(30, 20)]),
            random_candidates: 1,
            ..OptimizerSettings::default()
        };
        let mut rng = ScriptedSource::new(vec![25, 20]);
        let series = PriceSeries::from_closes([V_SHAPE, V_SHAPE].concat());

        let results = find_best_windows(&series, &settings, &mut rng);

        assert!(results.is_empty());
        // One random pair per window, two draws each, nothing else.
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn zero_window_size_yields_nothing() {
        let series = PriceSeries::from_closes(V_SHAPE.to_vec());
        let mut rng = ScriptedSource::new(vec![5, 20]);
        assert!(find_best_ratios(&series, 0, &mut rng).is_empty());
        assert_eq!(rng.draws(), 0);
    }
}
