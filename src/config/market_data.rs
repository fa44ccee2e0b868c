/// Yahoo chart API constraints and client defaults.
pub struct ChartApiConfig {
    pub base_url: &'static str,
    pub interval: &'static str,
    pub requests_per_minute: u32,
}

/// NSE autocomplete endpoint used for the stock search box.
pub struct SymbolSearchConfig {
    pub autocomplete_url: &'static str,
    pub accept_language: &'static str,
}

pub struct ClientDefaults {
    pub timeout_ms: u64,
    /// Both upstreams block requests without a browser-like agent.
    pub user_agent: &'static str,
}

pub struct MarketDataConfig {
    pub chart: ChartApiConfig,
    pub search: SymbolSearchConfig,
    pub client: ClientDefaults,
    /// Appended to a bare NSE symbol before it is handed to the chart API.
    pub exchange_suffix: &'static str,
}

pub const MARKET_DATA: MarketDataConfig = MarketDataConfig {
    chart: ChartApiConfig {
        base_url: "https://query1.finance.yahoo.com/v8/finance/chart",
        interval: "1d",
        requests_per_minute: 60,
    },
    search: SymbolSearchConfig {
        autocomplete_url: "https://www.nseindia.com/api/search/autocomplete",
        accept_language: "en-US,en;q=0.9",
    },
    client: ClientDefaults {
        timeout_ms: 15_000,
        user_agent: "Mozilla/5.0",
    },
    exchange_suffix: ".NS",
};
