//! Month-of-year seasonality of closing prices.

use {
    crate::{config::ANALYSIS, domain::Candle, utils::month_of_epoch_ms},
    itertools::Itertools,
    serde::Serialize,
    statrs::statistics::Statistics,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAverage {
    /// 1 = January
    pub month: u32,
    pub label: String,
    pub avg_close: f64,
    /// `(avg − min_avg) / avg · 100`, where `min_avg` is the lowest monthly average.
    pub pct_above_min: f64,
}

/// Mean close per calendar month (UTC), January first. Months without any
/// candle are omitted.
pub fn monthly_average_close(candles: &[Candle]) -> Vec<MonthlyAverage> {
    let by_month = candles
        .iter()
        .filter_map(|c| month_of_epoch_ms(c.timestamp_ms).map(|m| (m, c.close_price)))
        .into_group_map();

    let averages: Vec<(u32, f64)> = by_month
        .into_iter()
        .map(|(month, closes)| (month, closes.iter().mean()))
        .sorted_by_key(|(month, _)| *month)
        .collect();

    let min_avg = averages
        .iter()
        .map(|(_, avg)| *avg)
        .fold(f64::INFINITY, f64::min);

    averages
        .into_iter()
        .map(|(month, avg_close)| MonthlyAverage {
            month,
            label: month_label(month).to_string(),
            avg_close,
            pct_above_min: if avg_close.abs() > f64::EPSILON {
                (avg_close - min_avg) / avg_close * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

fn month_label(month: u32) -> &'static str {
    ANALYSIS
        .seasonality
        .month_labels
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("???")
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2021-01-15, 2021-01-20, 2021-03-10, 2022-01-05 (UTC)
    const JAN_15: i64 = 1_610_668_800_000;
    const JAN_20: i64 = 1_611_100_800_000;
    const MAR_10: i64 = 1_615_334_400_000;
    const JAN_05_NEXT: i64 = 1_641_340_800_000;

    fn candle(ts: i64, close: f64) -> Candle {
        Candle::new(ts, close, close, close, close, 0.0)
    }

    #[test]
    fn averages_pool_years_by_month() {
        let candles = [
            candle(JAN_15, 100.0),
            candle(JAN_20, 110.0),
            candle(MAR_10, 80.0),
            candle(JAN_05_NEXT, 120.0),
        ];
        let months = monthly_average_close(&candles);

        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, 1);
        assert_eq!(months[0].label, "Jan");
        assert!((months[0].avg_close - 110.0).abs() < 1e-9);
        assert_eq!(months[1].label, "Mar");
        assert!((months[1].avg_close - 80.0).abs() < 1e-9);

        // Minimum month sits at 0 %, January is (110 - 80) / 110 above it
        assert_eq!(months[1].pct_above_min, 0.0);
        assert!((months[0].pct_above_min - 30.0 / 110.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn no_candles_no_months() {
        assert!(monthly_average_close(&[]).is_empty());
    }
}
