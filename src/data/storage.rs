use {
    crate::config::{DF, PERSISTENCE},
    anyhow::Result,
    async_trait::async_trait,
    sqlx::{
        ConnectOptions, Pool, Row, Sqlite,
        sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    },
    std::{str::FromStr, time::Duration},
};

/// Persistent set of symbols the user has picked, in the order they were added.
#[async_trait]
pub trait SelectedStockStore: Send + Sync {
    async fn initialize(&self) -> Result<()>;
    /// Adding a symbol twice keeps the first entry. Blank symbols are ignored.
    async fn add(&self, symbol: &str) -> Result<()>;
    /// Removing an unknown symbol is a no-op.
    async fn remove(&self, symbol: &str) -> Result<()>;
    async fn list(&self) -> Result<Vec<String>>;
}

pub struct SqliteStockStore {
    pool: Pool<Sqlite>,
}

impl SqliteStockStore {
    pub async fn new(db_path: &str) -> Result<Self> {
        let cfg = &PERSISTENCE.stocks;
        let connection_options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(cfg.busy_timeout_secs))
            .synchronous(SqliteSynchronous::Normal)
            .log_slow_statements(log::LevelFilter::Warn, Duration::from_secs(2));

        let pool = SqlitePoolOptions::new()
            .max_connections(cfg.max_connections)
            .connect_with(connection_options)
            .await?;

        Ok(Self { pool })
    }

    /// Opens the store and creates the table in one go.
    pub async fn open(db_path: &str) -> Result<Self> {
        let store = Self::new(db_path).await?;
        store.initialize().await?;
        Ok(store)
    }
}

#[async_trait]
impl SelectedStockStore for SqliteStockStore {
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS selected_stock (
                id INTEGER PRIMARY KEY,
                symbol TEXT UNIQUE NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn add(&self, symbol: &str) -> Result<()> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Ok(());
        }

        let result = sqlx::query("INSERT OR IGNORE INTO selected_stock (symbol) VALUES (?)")
            .bind(symbol)
            .execute(&self.pool)
            .await?;

        if DF.log_stock_store {
            log::info!("add {} -> {} row(s)", symbol, result.rows_affected());
        }

        Ok(())
    }

    async fn remove(&self, symbol: &str) -> Result<()> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Ok(());
        }

        let result = sqlx::query("DELETE FROM selected_stock WHERE symbol = ?")
            .bind(symbol)
            .execute(&self.pool)
            .await?;

        if DF.log_stock_store {
            log::info!("remove {} -> {} row(s)", symbol, result.rows_affected());
        }

        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT symbol FROM selected_stock ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("symbol").map_err(Into::into))
            .collect()
    }
}
