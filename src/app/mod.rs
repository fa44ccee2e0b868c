//! Command runners behind the `stock-lens` subcommands.

mod optimize;
mod seasonality;
mod serve;

pub use {
    optimize::{OptimizeArgs, SymbolReport, optimize_symbols, run_optimize},
    seasonality::run_seasonality,
    serve::{ServeArgs, run_serve},
};

use crate::config::MARKET_DATA;

/// Appends the exchange suffix to bare NSE symbols; already-qualified
/// symbols (`TCS.NS`, `^NSEI`) pass through untouched.
pub fn qualify_symbol(symbol: &str) -> String {
    let symbol = symbol.trim().to_uppercase();
    if symbol.contains('.') || symbol.starts_with('^') {
        symbol
    } else {
        format!("{}{}", symbol, MARKET_DATA.exchange_suffix)
    }
}
