//! File persistence configuration

/// Configuration for the selected-stock table
pub struct StockStoreConfig {
    /// SQLite database path, created on first start
    pub db_path: &'static str,
    pub max_connections: u32,
    pub busy_timeout_secs: u64,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub stocks: StockStoreConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    stocks: StockStoreConfig {
        db_path: "stocks.sqlite",
        max_connections: 2, // Low throughput, a handful of clicks per minute
        busy_timeout_secs: 10,
    },
};
