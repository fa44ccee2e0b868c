//! Signal generator: EMA pair and crossover backtest.

use strum_macros::Display;

/// Position implied by comparing the short EMA against the long EMA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CrossSignal {
    #[strum(to_string = "long")]
    Long,
    #[strum(to_string = "short")]
    Short,
    /// EMAs exactly equal: no position.
    #[strum(to_string = "flat")]
    Flat,
}

impl CrossSignal {
    pub fn from_emas(ema_short: f64, ema_long: f64) -> Self {
        if ema_short > ema_long {
            CrossSignal::Long
        } else if ema_short < ema_long {
            CrossSignal::Short
        } else {
            CrossSignal::Flat
        }
    }

    #[inline]
    pub fn direction(self) -> f64 {
        match self {
            CrossSignal::Long => 1.0,
            CrossSignal::Short => -1.0,
            CrossSignal::Flat => 0.0,
        }
    }
}

/// Exponential moving average aligned 1:1 with `closes`.
///
/// Seeded with the first close (no warm-up is dropped), then
/// `ema[t] = α·close[t] + (1 − α)·ema[t − 1]` with `α = 2 / (period + 1)`.
/// Periods below 1 are treated as 1.
pub fn compute_ema(closes: &[f64], period: u32) -> Vec<f64> {
    let alpha = 2.0 / (period.max(1) as f64 + 1.0);

    let mut out = Vec::with_capacity(closes.len());
    let mut prev: Option<f64> = None;
    for &price in closes {
        let value = match prev {
            None => price,
            Some(p) => alpha * price + (1.0 - alpha) * p,
        };
        out.push(value);
        prev = Some(value);
    }
    out
}

/// Sum of daily returns traded on yesterday's crossover signal.
///
/// Undefined daily terms (a zero close followed by another zero gives 0/0) are
/// skipped. Returns `None` for fewer than two closes, and for a sum that is
/// itself NaN (opposite infinite terms). Callers must treat `None` as
/// non-comparable.
pub fn compute_backtest_return(closes: &[f64], ema_short: &[f64], ema_long: &[f64]) -> Option<f64> {
    debug_assert_eq!(closes.len(), ema_short.len());
    debug_assert_eq!(closes.len(), ema_long.len());

    let n = closes.len().min(ema_short.len()).min(ema_long.len());
    if n < 2 {
        return None;
    }

    let total: f64 = (1..n)
        .map(|t| {
            let daily_return = (closes[t] - closes[t - 1]) / closes[t - 1];
            // One-step lag: today's return is earned on yesterday's signal
            let held = CrossSignal::from_emas(ema_short[t - 1], ema_long[t - 1]);
            daily_return * held.direction()
        })
        .filter(|r| !r.is_nan())
        .sum();

    (!total.is_nan()).then_some(total)
}

/// Convenience: both EMAs plus the backtest for one period pair.
pub fn score_pair(closes: &[f64], short: u32, long: u32) -> Option<f64> {
    let ema_short = compute_ema(closes, short);
    let ema_long = compute_ema(closes, long);
    compute_backtest_return(closes, &ema_short, &ema_long)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_matches_recursive_formula() {
        // alpha = 2/(3+1) = 0.5
        let ema = compute_ema(&[10.0, 11.0, 12.0, 13.0], 3);
        let expected = [10.0, 10.5, 11.25, 12.125];
        for (got, want) in ema.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} != {want}");
        }
    }

    #[test]
    fn ema_output_aligned_with_input_and_seeded_by_first_price() {
        let closes = [101.5, 99.0, 100.25, 98.0, 103.0];
        for period in [1, 2, 9, 50] {
            let ema = compute_ema(&closes, period);
            assert_eq!(ema.len(), closes.len());
            assert_eq!(ema[0], 101.5);
        }
    }

    #[test]
    fn period_below_one_behaves_as_one() {
        let closes = [5.0, 7.0, 6.0, 9.0];
        assert_eq!(compute_ema(&closes, 0), compute_ema(&closes, 1));
        // alpha = 1 tracks the price exactly
        assert_eq!(compute_ema(&closes, 1), closes.to_vec());
    }

    #[test]
    fn ema_of_empty_series_is_empty() {
        assert!(compute_ema(&[], 9).is_empty());
    }

    #[test]
    fn tie_produces_flat_signal() {
        assert_eq!(CrossSignal::from_emas(1.0, 1.0), CrossSignal::Flat);
        assert_eq!(CrossSignal::from_emas(2.0, 1.0), CrossSignal::Long);
        assert_eq!(CrossSignal::from_emas(1.0, 2.0), CrossSignal::Short);
        assert_eq!(CrossSignal::Flat.direction(), 0.0);
    }

    #[test]
    fn fewer_than_two_points_is_undefined() {
        assert_eq!(compute_backtest_return(&[], &[], &[]), None);
        assert_eq!(compute_backtest_return(&[100.0], &[100.0], &[100.0]), None);
    }

    #[test]
    fn first_return_is_flat_because_emas_start_equal() {
        // Both EMAs are seeded with 100, so the signal held into t=1 is flat.
        assert_eq!(score_pair(&[100.0, 101.0], 2, 5), Some(0.0));
    }

    #[test]
    fn signal_is_lagged_by_one_step() {
        // Period 1 tracks price; the long EMA lags, so short > long after a rise.
        let closes = [100.0, 110.0, 121.0];
        let ema_short = compute_ema(&closes, 1);
        let ema_long = compute_ema(&closes, 3);
        // t=1: flat (seeded equal) -> 0; t=2: long on +10% -> 0.1
        let r = compute_backtest_return(&closes, &ema_short, &ema_long).unwrap();
        assert!((r - 0.1).abs() < 1e-12);
    }

    #[test]
    fn shorting_a_downtrend_is_profitable() {
        let closes = [100.0, 98.0, 96.0, 95.0, 93.0];
        let r = score_pair(&closes, 2, 5).unwrap();
        assert!((r - 0.05187746151092015).abs() < 1e-12);
    }

    #[test]
    fn uptrend_with_short_above_long_never_loses() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 1.5).collect();
        for (short, long) in [(2, 5), (5, 20), (9, 21), (12, 26)] {
            let r = score_pair(&closes, short, long).unwrap();
            assert!(r >= 0.0, "({short},{long}) returned {r}");
        }
    }

    #[test]
    fn backtest_is_idempotent() {
        let closes = [100.0, 95.0, 90.0, 85.0, 90.0, 95.0, 100.0];
        let s = compute_ema(&closes, 3);
        let l = compute_ema(&closes, 8);
        let first = compute_backtest_return(&closes, &s, &l);
        let second = compute_backtest_return(&closes, &s, &l);
        assert_eq!(first, second);
    }

    #[test]
    fn undefined_daily_terms_are_skipped() {
        // t1 flat (EMAs seeded equal), t2 long into a -100% day, t3 is 0/0
        let closes = [10.0, 12.0, 0.0, 0.0];
        let ema_short = compute_ema(&closes, 1);
        let ema_long = compute_ema(&closes, 3);
        assert_eq!(compute_backtest_return(&closes, &ema_short, &ema_long), Some(-1.0));
    }

    #[test]
    fn all_undefined_terms_sum_to_zero() {
        let closes = [0.0, 0.0, 0.0];
        let flat = [1.0, 1.0, 1.0];
        let up = [2.0, 2.0, 2.0];
        assert_eq!(compute_backtest_return(&closes, &up, &flat), Some(0.0));
    }
}
