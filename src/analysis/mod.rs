// Analysis algorithms: EMA-ratio search and chart annotations
mod random_source;
mod ratio_sequence;
mod seasonality;
mod signal;
mod smc;
mod window_optimizer;

pub use {
    random_source::{RandomSource, RngSource, ScriptedSource},
    ratio_sequence::{RatioSequence, to_decimal_ratios},
    seasonality::{MonthlyAverage, monthly_average_close},
    signal::{CrossSignal, compute_backtest_return, compute_ema, score_pair},
    smc::{FairValueGap, GapDirection, SwingKind, SwingPoint, fair_value_gaps, swing_highs_lows},
    window_optimizer::{
        CandidateScore, SeedPool, WindowResult, WindowStep, candidate_pool, evaluate_window,
        find_best_ratios, find_best_windows, reseed, score_candidates, select_best,
    },
};
