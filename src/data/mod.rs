mod provider;
mod rate_limiter;
mod storage;
mod symbol_search;

pub use {
    provider::{MarketDataProvider, ProviderError, YahooProvider},
    rate_limiter::RequestBudget,
    storage::{SelectedStockStore, SqliteStockStore},
    symbol_search::{NseSymbolSearch, SymbolMatch, SymbolSearch},
};
