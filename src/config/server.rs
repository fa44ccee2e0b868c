pub struct ServerConfig {
    pub bind: &'static str,
    pub port: u16,
    /// Cookie carrying the per-browser session id.
    pub session_cookie: &'static str,
    /// Live sessions kept in memory; the least recently used one is evicted beyond this.
    pub max_sessions: usize,
}

pub const SERVER: ServerConfig = ServerConfig {
    bind: "127.0.0.1",
    port: 5000,
    session_cookie: "stock_lens_sid",
    max_sessions: 10_000,
};
