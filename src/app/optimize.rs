use {
    crate::{
        analysis::{RatioSequence, RngSource, WindowResult, find_best_windows},
        config::{MARKET_DATA, OptimizerSettings},
        data::{MarketDataProvider, RequestBudget, YahooProvider},
        domain::PriceSeries,
        utils::epoch_ms_to_date_string,
    },
    anyhow::{Context, Result},
    chrono::NaiveDate,
    rayon::prelude::*,
    tabled::{Table, Tabled},
};

pub struct OptimizeArgs {
    pub symbols: Vec<String>,
    pub settings: OptimizerSettings,
    /// Base seed for reproducible runs; symbol `i` uses `seed + i`.
    pub seed: Option<u64>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Optimizer output for one symbol, ready for printing.
pub struct SymbolReport {
    pub symbol: String,
    pub series: PriceSeries,
    pub windows: Vec<WindowResult>,
}

#[derive(Tabled)]
struct WindowRow {
    #[tabled(rename = "Window")]
    index: usize,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "Best EMA")]
    pair: String,
    #[tabled(rename = "Ratio")]
    ratio: String,
    #[tabled(rename = "Window Return")]
    realized_return: String,
}

pub async fn run_optimize(args: OptimizeArgs) -> Result<()> {
    let provider = YahooProvider::new(RequestBudget::new(MARKET_DATA.chart.requests_per_minute))?;

    // Fetches share the request budget, so they go one by one
    let mut fetched = Vec::with_capacity(args.symbols.len());
    for symbol in &args.symbols {
        let candles = provider
            .fetch_daily_candles(symbol, args.start, args.end)
            .await
            .with_context(|| format!("Failed to fetch {}", symbol))?;
        if candles.is_empty() {
            log::warn!("No data found for symbol: {}", symbol);
            continue;
        }
        let series = PriceSeries::from_candles(&candles, true)
            .with_context(|| format!("Bad price history for {}", symbol))?;
        fetched.push((symbol.clone(), series));
    }

    let settings = args.settings.clone();
    let seed = args.seed;
    let reports = tokio::task::spawn_blocking(move || optimize_symbols(fetched, &settings, seed))
        .await
        .context("Optimizer task failed")?;

    for report in &reports {
        print_report(report);
    }
    Ok(())
}

/// Runs the window search for every symbol in parallel. Each symbol gets its
/// own random source, so seeded runs do not depend on scheduling.
pub fn optimize_symbols(
    fetched: Vec<(String, PriceSeries)>,
    settings: &OptimizerSettings,
    seed: Option<u64>,
) -> Vec<SymbolReport> {
    fetched
        .into_par_iter()
        .enumerate()
        .map(|(i, (symbol, series))| {
            let windows = match seed {
                Some(seed) => {
                    let mut rng = RngSource::seeded(seed.wrapping_add(i as u64));
                    find_best_windows(&series, settings, &mut rng)
                }
                None => {
                    let mut rng = RngSource::from_entropy();
                    find_best_windows(&series, settings, &mut rng)
                }
            };
            SymbolReport {
                symbol,
                series,
                windows,
            }
        })
        .collect()
}

fn print_report(report: &SymbolReport) {
    let sequence = RatioSequence::from_windows(&report.windows);
    let timestamps = report.series.timestamps();

    let rows: Vec<WindowRow> = report
        .windows
        .iter()
        .zip(&sequence.ratios)
        .enumerate()
        .map(|(i, (w, ratio))| WindowRow {
            index: i + 1,
            from: timestamps
                .get(w.start)
                .map(|ts| epoch_ms_to_date_string(*ts))
                .unwrap_or_default(),
            pair: w.pair.label(),
            ratio: format!("{:.3}", ratio),
            realized_return: format!("{:+.2}%", w.realized_return * 100.0),
        })
        .collect();

    println!(
        "\n{}: {} closes, {} windows",
        report.symbol,
        report.series.len(),
        rows.len()
    );
    if !rows.is_empty() {
        println!("{}", Table::new(rows));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(n: usize, phase: f64) -> PriceSeries {
        PriceSeries::from_closes((0..n).map(|i| 100.0 + ((i as f64) * 0.5 + phase).sin() * 4.0).collect())
    }

    #[test]
    fn seeded_parallel_runs_are_reproducible() {
        let fetched = || {
            vec![
                ("AAA.NS".to_string(), wave(60, 0.0)),
                ("BBB.NS".to_string(), wave(45, 1.3)),
            ]
        };
        let settings = OptimizerSettings::default();

        let first = optimize_symbols(fetched(), &settings, Some(7));
        let second = optimize_symbols(fetched(), &settings, Some(7));

        assert_eq!(first.len(), 2);
        assert_eq!(first[0].symbol, "AAA.NS");
        assert_eq!(first[0].windows.len(), 6);
        assert_eq!(first[1].windows.len(), 4);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.windows, b.windows);
        }
    }
}
