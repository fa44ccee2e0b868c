//! Cookie-identified browser sessions. The cookie only carries a uuid; the
//! analysed symbol lives server-side in a bounded [`SessionStore`].

use {
    crate::config::SERVER,
    axum::http::{HeaderMap, header},
    std::collections::HashMap,
    tokio::sync::Mutex,
    uuid::Uuid,
};

/// Session id from the request's `Cookie` header. Anything that is not a uuid
/// is treated as no session, so clients cannot choose their own keys.
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SERVER.session_cookie)
        .and_then(|(_, id)| Uuid::parse_str(id).ok())
        .map(|id| id.to_string())
}

pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// `Set-Cookie` value binding the browser to `id`.
pub fn session_cookie(id: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SERVER.session_cookie, id
    )
}

struct SessionEntry {
    symbol: String,
    last_used: u64,
}

#[derive(Default)]
struct SessionTable {
    entries: HashMap<String, SessionEntry>,
    clock: u64,
}

impl SessionTable {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

/// Session id -> exchange-qualified symbol, holding at most `capacity`
/// sessions. Binding a new session at capacity evicts the least recently used.
pub struct SessionStore {
    capacity: usize,
    table: Mutex<SessionTable>,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            table: Mutex::new(SessionTable::default()),
        }
    }

    pub async fn symbol(&self, session_id: &str) -> Option<String> {
        let mut table = self.table.lock().await;
        let now = table.tick();
        let entry = table.entries.get_mut(session_id)?;
        entry.last_used = now;
        Some(entry.symbol.clone())
    }

    pub async fn bind(&self, session_id: &str, symbol: String) {
        let mut table = self.table.lock().await;
        let now = table.tick();

        if !table.entries.contains_key(session_id) && table.entries.len() >= self.capacity {
            let oldest = table
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(id, _)| id.clone());
            if let Some(oldest) = oldest {
                table.entries.remove(&oldest);
                log::debug!("Session store full, evicted {}", oldest);
            }
        }

        table.entries.insert(
            session_id.to_string(),
            SessionEntry {
                symbol,
                last_used: now,
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.table.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.table.lock().await.entries.is_empty()
    }
}
