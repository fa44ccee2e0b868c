use {
    crate::{
        config::{MARKET_DATA, OptimizerSettings},
        data::{NseSymbolSearch, RequestBudget, SqliteStockStore, YahooProvider},
        server::{self, AppState},
    },
    anyhow::{Context, Result},
    std::{net::SocketAddr, sync::Arc},
};

pub struct ServeArgs {
    pub db_path: String,
    pub bind: String,
    pub port: u16,
    pub settings: OptimizerSettings,
}

pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store = SqliteStockStore::open(&args.db_path)
        .await
        .with_context(|| format!("Failed to open stock store at {}", args.db_path))?;
    let provider = YahooProvider::new(RequestBudget::new(MARKET_DATA.chart.requests_per_minute))?;
    let search = NseSymbolSearch::new()?;

    let state = AppState::new(
        Arc::new(store),
        Arc::new(provider),
        Arc::new(search),
        args.settings,
    );

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", args.bind, args.port))?;

    server::serve(state, addr).await
}
