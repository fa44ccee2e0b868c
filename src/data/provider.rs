#[cfg(debug_assertions)]
use crate::config::DF;
use {
    crate::{
        config::MARKET_DATA,
        data::RequestBudget,
        domain::Candle,
        utils::{TimeUtils, date_to_epoch_sec},
    },
    anyhow::{Context, Result},
    async_trait::async_trait,
    chrono::NaiveDate,
    serde::Deserialize,
    std::{error::Error, fmt, time::Duration},
};

/// Abstract interface for fetching market data.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily candles for `symbol` in `[start, end)`, ascending by timestamp.
    async fn fetch_daily_candles(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Candle>>;
}

#[derive(Debug)]
pub enum ProviderError {
    Upstream { code: String, description: String },
    MalformedResponse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProviderError::Upstream { code, description } => {
                write!(f, "Chart API error {}: {}", code, description)
            }
            ProviderError::MalformedResponse(msg) => write!(f, "Malformed chart response: {}", msg),
        }
    }
}

impl Error for ProviderError {}

// ─── Yahoo chart API ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
    #[serde(default)]
    adjclose: Vec<AdjClose>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

pub struct YahooProvider {
    client: reqwest::Client,
    budget: RequestBudget,
}

impl YahooProvider {
    pub fn new(budget: RequestBudget) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(MARKET_DATA.client.timeout_ms))
            .user_agent(MARKET_DATA.client.user_agent)
            .build()
            .context("Failed to build HTTP client for the chart API")?;
        Ok(Self { client, budget })
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    async fn fetch_daily_candles(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Candle>> {
        self.budget.acquire(symbol).await;

        let url = format!("{}/{}", MARKET_DATA.chart.base_url, symbol);
        let period1 = date_to_epoch_sec(start).to_string();
        let period2 = date_to_epoch_sec(end).to_string();

        #[cfg(debug_assertions)]
        if DF.log_provider {
            log::info!("Fetching {} daily candles {} -> {}", symbol, start, end);
        }

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.as_str()),
                ("period2", period2.as_str()),
                ("interval", MARKET_DATA.chart.interval),
                ("events", "history"),
            ])
            .send()
            .await
            .with_context(|| format!("Chart request for {} failed", symbol))?;

        // Unknown symbols come back as 404 with a JSON error body, so parse before status
        let envelope: ChartEnvelope = response
            .json()
            .await
            .with_context(|| format!("Chart response for {} is not valid JSON", symbol))?;

        let candles = candles_from_envelope(envelope)?;
        log::info!("{}: {} daily candles", symbol, candles.len());
        Ok(candles)
    }
}

fn candles_from_envelope(envelope: ChartEnvelope) -> Result<Vec<Candle>, ProviderError> {
    if let Some(err) = envelope.chart.error {
        // "Not Found" is an empty history from the caller's point of view
        if err.code == "Not Found" {
            return Ok(Vec::new());
        }
        return Err(ProviderError::Upstream {
            code: err.code,
            description: err.description,
        });
    }

    let result = envelope
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| ProviderError::MalformedResponse("no result entry".to_string()))?;

    Ok(candles_from_result(result))
}

/// Zips the column arrays into candles. Missing values are forward-filled per
/// column from the previous row; leading rows that cannot be filled are dropped.
fn candles_from_result(result: ChartResult) -> Vec<Candle> {
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let adj = result
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose)
        .unwrap_or_default();

    let mut candles: Vec<Candle> = Vec::with_capacity(result.timestamp.len());
    for (i, &ts_sec) in result.timestamp.iter().enumerate() {
        let prev = candles.last();
        let fill = |v: Option<f64>, pick: fn(&Candle) -> f64| v.or_else(|| prev.map(pick));

        let Some(close) = fill(at(&quote.close, i), |c| c.close_price) else {
            continue;
        };
        let open = fill(at(&quote.open, i), |c| c.open_price).unwrap_or(close);
        let high = fill(at(&quote.high, i), |c| c.high_price).unwrap_or(close);
        let low = fill(at(&quote.low, i), |c| c.low_price).unwrap_or(close);
        let volume = fill(at(&quote.volume, i), |c| c.volume).unwrap_or(0.0);
        let adj_close = fill(at(&adj, i), |c| c.adj_close_price).unwrap_or(close);

        let candle = Candle::new(ts_sec * TimeUtils::MS_IN_S, open, high, low, close, volume)
            .with_adj_close(adj_close);
        candles.push(candle);
    }
    candles
}

fn at(column: &[Option<f64>], i: usize) -> Option<f64> {
    column.get(i).copied().flatten()
}
