//! Configuration module for the stock-lens application.

// Can all be private now because we have a public re-export.
mod analysis;
mod debug;
mod market_data;
mod optimizer;
mod persistence;
mod server;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisConfig, DateRange, SeasonalityConfig, SmcConfig};
pub use debug::DF;
pub use market_data::{MARKET_DATA, MarketDataConfig};
pub use optimizer::{OPTIMIZER, OptimizerConfig, OptimizerSettings};
pub use persistence::{PERSISTENCE, PersistenceConfig};
pub use server::{SERVER, ServerConfig};
