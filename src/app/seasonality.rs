use {
    crate::{
        analysis::monthly_average_close,
        config::{ANALYSIS, MARKET_DATA},
        data::{MarketDataProvider, RequestBudget, YahooProvider},
    },
    anyhow::{Context, Result, bail},
    tabled::{Table, Tabled},
};

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    label: String,
    #[tabled(rename = "Avg Close")]
    avg_close: String,
    #[tabled(rename = "Above Weakest")]
    pct_above_min: String,
}

pub async fn run_seasonality(symbol: &str) -> Result<()> {
    let range = &ANALYSIS.seasonality.range;
    let (Some(start), Some(end)) = (range.start_date(), range.end_date()) else {
        bail!("Invalid seasonality date range {:?}", range);
    };

    let provider = YahooProvider::new(RequestBudget::new(MARKET_DATA.chart.requests_per_minute))?;
    let candles = provider
        .fetch_daily_candles(symbol, start, end)
        .await
        .with_context(|| format!("Failed to fetch {}", symbol))?;

    if candles.is_empty() {
        bail!("No data found for symbol: {}", symbol);
    }

    let rows: Vec<MonthRow> = monthly_average_close(&candles)
        .into_iter()
        .map(|m| MonthRow {
            label: m.label,
            avg_close: format!("{:.2}", m.avg_close),
            pct_above_min: format!("{:.2}%", m.pct_above_min),
        })
        .collect();

    println!("\nSeasonality for {} ({} -> {})", symbol, start, end);
    println!("{}", Table::new(rows));
    Ok(())
}
