//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Log every scored candidate inside each window.
    pub log_candidates: bool,

    /// Log the winner and the next seed pool per window.
    pub log_windows: bool,

    /// Time the EMA ratio search with `trace_time!`.
    pub log_performance: bool,

    pub log_stock_store: bool,

    pub log_provider: bool,

    pub log_sessions: bool,
}

pub const DF: LogFlags = LogFlags {
    log_windows: false,

    log_candidates: false,
    log_performance: false,
    log_stock_store: false,
    log_provider: false,
    log_sessions: false,
};
