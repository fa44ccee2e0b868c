use std::time::Duration;

/// Times `$block` when `DF.log_performance` is set and reports it through
/// [`report_elapsed`]. `per $units` spreads the cost over the work items (the
/// optimizer passes its window count).
#[macro_export]
macro_rules! trace_time {
    ($name:expr, $budget_ms:expr, per $units:expr, $block:block) => {{
        if $crate::config::DF.log_performance {
            let started = std::time::Instant::now();
            let result = $block;
            $crate::utils::report_elapsed($name, started.elapsed(), $budget_ms, $units);
            result
        } else {
            $block
        }
    }};
}

/// Logs one timing line; a warning when `elapsed` overran `budget_ms`.
/// Returns whether the budget was overrun.
pub fn report_elapsed(name: &str, elapsed: Duration, budget_ms: u64, units: usize) -> bool {
    let total_ms = elapsed.as_secs_f64() * 1000.0;
    let per_unit_ms = total_ms / units.max(1) as f64;
    let over_budget = elapsed > Duration::from_millis(budget_ms);

    if over_budget {
        log::warn!(
            "🐢 [{}] {:.2}ms over {} unit(s), {:.3}ms each (budget {}ms)",
            name,
            total_ms,
            units,
            per_unit_ms,
            budget_ms
        );
    } else {
        log::debug!("[{}] {:.2}ms over {} unit(s)", name, total_ms, units);
    }
    over_budget
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_is_exclusive() {
        assert!(!report_elapsed("search", Duration::from_millis(50), 50, 10));
        assert!(report_elapsed("search", Duration::from_millis(51), 50, 10));
    }

    #[test]
    fn zero_units_do_not_divide_by_zero() {
        assert!(!report_elapsed("search", Duration::ZERO, 1, 0));
    }

    #[test]
    fn macro_yields_block_value() {
        let value = crate::trace_time!("sum", 1_000, per 3, { [1, 2, 3].iter().sum::<i32>() });
        assert_eq!(value, 6);
    }
}
