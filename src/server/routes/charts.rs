use {
    crate::{
        analysis::{
            FairValueGap, MonthlyAverage, RatioSequence, RngSource, SwingPoint, fair_value_gaps,
            find_best_windows, monthly_average_close, swing_highs_lows,
        },
        config::{ANALYSIS, DateRange},
        domain::{Candle, PriceSeries},
        server::{AppState, error::ApiError, session::session_id},
    },
    axum::{
        Json, Router,
        extract::State,
        http::HeaderMap,
        routing::get,
    },
    serde::Serialize,
    std::sync::Arc,
};

// ── Responses ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SeasonalityResponse {
    symbol: String,
    months: Vec<MonthlyAverage>,
}

#[derive(Debug, Serialize)]
pub struct EmaOptimizationResponse {
    symbol: String,
    window_size: usize,
    #[serde(flatten)]
    sequence: RatioSequence,
}

#[derive(Debug, Serialize)]
pub struct SmcResponse {
    symbol: String,
    candles: Vec<Candle>,
    fair_value_gaps: Vec<FairValueGap>,
    swings: Vec<SwingPoint>,
}

// ── Route definitions ────────────────────────────────────────────────────

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/seasonality", get(seasonality))
        .route("/api/ema_optimization", get(ema_optimization))
        .route("/api/smc", get(smc))
}

// ── Handlers ─────────────────────────────────────────────────────────────

async fn seasonality(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SeasonalityResponse>, ApiError> {
    let symbol = analysed_symbol(&state, &headers).await?;
    let candles = fetch_range(&state, &symbol, &ANALYSIS.seasonality.range).await?;

    Ok(Json(SeasonalityResponse {
        months: monthly_average_close(&candles),
        symbol,
    }))
}

async fn ema_optimization(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<EmaOptimizationResponse>, ApiError> {
    let symbol = analysed_symbol(&state, &headers).await?;
    let candles = fetch_range(&state, &symbol, &ANALYSIS.ema_range).await?;

    let series = PriceSeries::from_candles(&candles, true)
        .map_err(|e| ApiError::Upstream(format!("{}: {}", symbol, e)))?;
    let settings = state.optimizer.clone();

    // CPU-bound: keep it off the async workers
    let sequence = tokio::task::spawn_blocking(move || {
        let mut rng = RngSource::from_entropy();
        let windows = find_best_windows(&series, &settings, &mut rng);
        RatioSequence::from_windows(&windows)
    })
    .await?;

    log::info!("{}: {} windows optimized", symbol, sequence.len());

    Ok(Json(EmaOptimizationResponse {
        symbol,
        window_size: state.optimizer.window_size,
        sequence,
    }))
}

async fn smc(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SmcResponse>, ApiError> {
    let symbol = analysed_symbol(&state, &headers).await?;
    let candles = fetch_range(&state, &symbol, &ANALYSIS.smc.range).await?;

    Ok(Json(SmcResponse {
        fair_value_gaps: fair_value_gaps(&candles),
        swings: swing_highs_lows(&candles, ANALYSIS.smc.swing_length),
        candles,
        symbol,
    }))
}

// ── Helpers ──────────────────────────────────────────────────────────────

async fn analysed_symbol(state: &AppState, headers: &HeaderMap) -> Result<String, ApiError> {
    let no_symbol = || ApiError::BadRequest("No stock symbol found in session.".to_string());
    let sid = session_id(headers).ok_or_else(no_symbol)?;
    state.session_symbol(&sid).await.ok_or_else(no_symbol)
}

/// Non-empty candles for `range`, or the 404 the chart pages expect.
async fn fetch_range(state: &AppState, symbol: &str, range: &DateRange) -> Result<Vec<Candle>, ApiError> {
    let (Some(start), Some(end)) = (range.start_date(), range.end_date()) else {
        return Err(ApiError::Internal(format!("Invalid date range {:?}", range)));
    };

    let candles = state
        .provider
        .fetch_daily_candles(symbol, start, end)
        .await
        .map_err(ApiError::upstream)?;

    if candles.is_empty() {
        return Err(ApiError::NotFound(format!("No data found for symbol: {}.", symbol)));
    }
    Ok(candles)
}
