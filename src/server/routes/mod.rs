mod charts;
mod stocks;

use {crate::server::AppState, axum::Router, std::sync::Arc};

/// Assemble the API router.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new().merge(stocks::routes()).merge(charts::routes())
}
