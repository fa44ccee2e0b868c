mod perf;
mod time_utils;

pub use perf::report_elapsed;
pub use time_utils::{
    TimeUtils, date_to_epoch_sec, epoch_ms_to_date_string, epoch_ms_to_utc, month_of_epoch_ms,
};
