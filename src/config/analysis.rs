//! Chart analysis configuration (date ranges, seasonality, smart-money concepts)

use chrono::NaiveDate;

/// Inclusive start, exclusive end. `end == None` means "up to today".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub start: (i32, u32, u32),
    pub end: Option<(i32, u32, u32)>,
}

impl DateRange {
    pub fn start_date(&self) -> Option<NaiveDate> {
        let (y, m, d) = self.start;
        NaiveDate::from_ymd_opt(y, m, d)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        match self.end {
            Some((y, m, d)) => NaiveDate::from_ymd_opt(y, m, d),
            None => Some(chrono::Utc::now().date_naive()),
        }
    }
}

pub struct SeasonalityConfig {
    pub range: DateRange,
    pub month_labels: [&'static str; 12],
}

pub struct SmcConfig {
    pub range: DateRange,
    /// Candles either side of a swing point (window is `2 * swing_length`).
    pub swing_length: usize,
}

/// The Master Analysis Configuration
pub struct AnalysisConfig {
    pub seasonality: SeasonalityConfig,
    /// History fed to the EMA-ratio search.
    pub ema_range: DateRange,
    pub smc: SmcConfig,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    seasonality: SeasonalityConfig {
        range: DateRange {
            start: (2004, 1, 1),
            end: Some((2024, 1, 1)),
        },
        month_labels: [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ],
    },
    ema_range: DateRange {
        start: (2010, 1, 1),
        end: Some((2023, 1, 1)),
    },
    smc: SmcConfig {
        range: DateRange {
            start: (2023, 1, 1),
            end: None,
        },
        swing_length: 50,
    },
};
