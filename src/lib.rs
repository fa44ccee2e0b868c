#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod server;
pub mod utils;

// Re-export commonly used types outside of crate
pub use {
    analysis::{RatioSequence, find_best_ratios, find_best_windows, to_decimal_ratios},
    config::{ANALYSIS, OPTIMIZER, OptimizerSettings, PERSISTENCE, SERVER},
    domain::{Candle, PeriodPair, PriceSeries},
};

// CLI argument parsing
use {
    chrono::NaiveDate,
    clap::{Parser, Subcommand},
    utils::TimeUtils,
};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SQLite file holding the selected stocks
    #[arg(long, default_value_t = PERSISTENCE.stocks.db_path.to_string())]
    pub db: String,

    #[arg(long, default_value_t = SERVER.bind.to_string())]
    pub bind: String,

    #[arg(long, default_value_t = SERVER.port)]
    pub port: u16,

    /// Closes per optimizer window
    #[arg(long, default_value_t = OPTIMIZER.window_size, global = true)]
    pub window_size: usize,

    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the JSON API
    Serve,

    /// Fetch daily closes and print the best EMA pair per window
    Optimize {
        /// NSE symbols (".NS" is appended when missing)
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Seed the random exploration for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// First day (YYYY-MM-DD)
        #[arg(long, value_parser = parse_cli_date)]
        start: Option<NaiveDate>,

        /// Day after the last (YYYY-MM-DD)
        #[arg(long, value_parser = parse_cli_date)]
        end: Option<NaiveDate>,
    },

    /// Print month-of-year average closes
    Seasonality { symbol: String },
}

fn parse_cli_date(text: &str) -> Result<NaiveDate, String> {
    TimeUtils::parse_date(text).ok_or_else(|| format!("expected YYYY-MM-DD, got '{}'", text))
}

impl Cli {
    pub fn optimizer_settings(&self) -> OptimizerSettings {
        OptimizerSettings::default().with_window_size(self.window_size)
    }
}
