use {
    std::{
        sync::Arc,
        time::{Duration, SystemTime, UNIX_EPOCH},
    },
    tokio::sync::Mutex,
};

/// Shared per-minute request budget for one upstream host.
///
/// Counts requests in wall-clock minutes; once the budget is spent, callers
/// sleep until the next minute boundary.
#[derive(Clone)]
pub struct RequestBudget {
    inner: Arc<Mutex<BudgetWindow>>,
}

struct BudgetWindow {
    used: u32,
    minute_idx: u64,
    per_minute: u32,
}

impl RequestBudget {
    pub fn new(per_minute: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BudgetWindow {
                used: 0,
                minute_idx: current_minute_idx(),
                per_minute: per_minute.max(1),
            })),
        }
    }

    /// Waits until one request fits in the current minute, then books it.
    pub async fn acquire(&self, label: &str) {
        loop {
            let wait = {
                let mut window = self.inner.lock().await;
                let now_idx = current_minute_idx();
                if now_idx > window.minute_idx {
                    window.used = 0;
                    window.minute_idx = now_idx;
                }

                if window.used < window.per_minute {
                    window.used += 1;
                    return;
                }

                seconds_to_next_minute() + Duration::from_millis(100)
            };

            log::warn!(
                "🛑 Request budget spent for [{}]. Waiting {:.1}s for the next minute...",
                label,
                wait.as_secs_f64()
            );
            tokio::time::sleep(wait).await;
        }
    }

    /// Requests still available in the current minute.
    pub async fn remaining(&self) -> u32 {
        let window = self.inner.lock().await;
        if current_minute_idx() > window.minute_idx {
            window.per_minute
        } else {
            window.per_minute.saturating_sub(window.used)
        }
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs()
}

fn current_minute_idx() -> u64 {
    now_secs() / 60
}

fn seconds_to_next_minute() -> Duration {
    Duration::from_secs(60 - now_secs() % 60)
}
