#[cfg(debug_assertions)]
use crate::config::DF;
use {
    crate::{
        config::{OptimizerSettings, SERVER},
        data::{MarketDataProvider, SelectedStockStore, SymbolSearch},
        server::session::SessionStore,
    },
    std::sync::Arc,
};

/// Shared application state, passed to all route handlers via `axum::extract::State`.
pub struct AppState {
    pub store: Arc<dyn SelectedStockStore>,
    pub provider: Arc<dyn MarketDataProvider>,
    pub search: Arc<dyn SymbolSearch>,
    pub optimizer: OptimizerSettings,

    /// Symbol chosen for analysis, per browser session.
    sessions: SessionStore,
}

impl AppState {
    pub fn new(
        store: Arc<dyn SelectedStockStore>,
        provider: Arc<dyn MarketDataProvider>,
        search: Arc<dyn SymbolSearch>,
        optimizer: OptimizerSettings,
    ) -> Arc<Self> {
        Arc::new(Self {
            store,
            provider,
            search,
            optimizer,
            sessions: SessionStore::new(SERVER.max_sessions),
        })
    }

    pub async fn session_symbol(&self, session_id: &str) -> Option<String> {
        self.sessions.symbol(session_id).await
    }

    pub async fn set_session_symbol(&self, session_id: &str, symbol: String) {
        #[cfg(debug_assertions)]
        if DF.log_sessions {
            log::info!("session {} -> {}", session_id, symbol);
        }
        self.sessions.bind(session_id, symbol).await;
    }
}
