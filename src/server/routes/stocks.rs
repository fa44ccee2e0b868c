use {
    crate::{
        config::MARKET_DATA,
        data::SymbolMatch,
        server::{
            AppState,
            error::ApiError,
            session::{new_session_id, session_cookie, session_id},
        },
    },
    axum::{
        Json, Router,
        extract::{Query, State},
        http::{HeaderMap, header},
        response::IntoResponse,
        routing::{get, post},
    },
    serde::Deserialize,
    serde_json::{Value, json},
    std::sync::Arc,
};

// ── Request bodies ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SymbolParam {
    #[serde(default)]
    symbol: Option<String>,
}

fn non_blank(symbol: Option<String>) -> Option<String> {
    symbol
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// ── Route definitions ────────────────────────────────────────────────────

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/api/search_stock", get(search_stock))
        .route("/api/add_stock", post(add_stock))
        .route("/api/remove_stock", post(remove_stock))
        .route("/api/get_selected_stocks", get(get_selected_stocks))
        .route("/api/set_stock_for_analysis", post(set_stock_for_analysis))
}

// ── Handlers ─────────────────────────────────────────────────────────────

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn search_stock(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<SymbolMatch>>, ApiError> {
    let Some(query) = non_blank(q.q) else {
        return Ok(Json(Vec::new()));
    };
    let matches = state.search.search(&query).await.map_err(ApiError::upstream)?;
    Ok(Json(matches))
}

async fn add_stock(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SymbolParam>,
) -> Result<Json<Vec<String>>, ApiError> {
    if let Some(symbol) = non_blank(body.symbol) {
        state.store.add(&symbol).await?;
    }
    Ok(Json(state.store.list().await?))
}

async fn remove_stock(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SymbolParam>,
) -> Result<Json<Vec<String>>, ApiError> {
    if let Some(symbol) = non_blank(q.symbol) {
        state.store.remove(&symbol).await?;
    }
    Ok(Json(state.store.list().await?))
}

async fn get_selected_stocks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

/// Binds the bare NSE symbol (qualified with the exchange suffix) to the
/// caller's session, issuing a session cookie when the caller has none.
async fn set_stock_for_analysis(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<SymbolParam>,
) -> Result<impl IntoResponse, ApiError> {
    let symbol = non_blank(body.symbol)
        .ok_or_else(|| ApiError::BadRequest("No stock symbol provided".to_string()))?;

    let sid = session_id(&headers).unwrap_or_else(new_session_id);
    let qualified = format!("{}{}", symbol, MARKET_DATA.exchange_suffix);
    state.set_session_symbol(&sid, qualified).await;

    Ok((
        [(header::SET_COOKIE, session_cookie(&sid))],
        Json(json!({ "message": format!("Stock {} set for analysis", symbol) })),
    ))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::server::routes::test_support::{FixedProvider, state_with},
        axum::http::{HeaderValue, StatusCode},
    };

    const SID: &str = "3d9a4f10-6b2c-4e7d-8f15-a2b3c4d5e6f7";

    fn issued_session(response: &axum::response::Response) -> String {
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_string();
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(&cookie).unwrap());
        session_id(&headers).unwrap()
    }

    fn symbol(s: &str) -> SymbolParam {
        SymbolParam {
            symbol: Some(s.to_string()),
        }
    }

    #[tokio::test]
    async fn add_and_remove_return_current_selection() {
        let (state, _) = state_with(FixedProvider::default());

        add_stock(State(state.clone()), Json(symbol("TCS"))).await.unwrap();
        let Json(list) = add_stock(State(state.clone()), Json(symbol("INFY"))).await.unwrap();
        assert_eq!(list, vec!["TCS", "INFY"]);

        let Json(list) = remove_stock(State(state.clone()), Query(symbol("TCS"))).await.unwrap();
        assert_eq!(list, vec!["INFY"]);

        let Json(list) = remove_stock(State(state.clone()), Query(SymbolParam { symbol: None }))
            .await
            .unwrap();
        assert_eq!(list, vec!["INFY"]);
    }

    #[tokio::test]
    async fn blank_search_skips_upstream() {
        let (state, _) = state_with(FixedProvider::default());
        let Json(hits) = search_stock(State(state.clone()), Query(SearchQuery { q: None }))
            .await
            .unwrap();
        assert!(hits.is_empty());

        let Json(hits) = search_stock(
            State(state),
            Query(SearchQuery {
                q: Some("tcs".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(hits[0].symbol, "TCS");
    }

    #[tokio::test]
    async fn set_stock_requires_symbol() {
        let (state, _) = state_with(FixedProvider::default());
        let err = set_stock_for_analysis(State(state), HeaderMap::new(), Json(symbol("  ")))
            .await
            .err()
            .unwrap();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn set_stock_reuses_existing_session() {
        let (state, _) = state_with(FixedProvider::default());
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&session_cookie(SID)).unwrap(),
        );

        let response = set_stock_for_analysis(State(state.clone()), headers, Json(symbol("TCS")))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.session_symbol(SID).await.as_deref(), Some("TCS.NS"));
    }

    #[tokio::test]
    async fn set_stock_issues_cookie_for_new_browser() {
        let (state, _) = state_with(FixedProvider::default());
        let response = set_stock_for_analysis(State(state.clone()), HeaderMap::new(), Json(symbol("INFY")))
            .await
            .unwrap()
            .into_response();

        let sid = issued_session(&response);
        assert_eq!(state.session_symbol(&sid).await.as_deref(), Some("INFY.NS"));
    }

    #[tokio::test]
    async fn non_uuid_cookie_gets_a_fresh_session() {
        let (state, _) = state_with(FixedProvider::default());
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&session_cookie("client-chosen-key")).unwrap(),
        );

        let response = set_stock_for_analysis(State(state.clone()), headers, Json(symbol("TCS")))
            .await
            .unwrap()
            .into_response();

        let sid = issued_session(&response);
        assert_ne!(sid, "client-chosen-key");
        assert!(uuid::Uuid::parse_str(&sid).is_ok());
        assert_eq!(state.session_symbol("client-chosen-key").await, None);
        assert_eq!(state.session_symbol(&sid).await.as_deref(), Some("TCS.NS"));
    }
}
