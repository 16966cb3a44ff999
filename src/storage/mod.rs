use anyhow::{Context as _, Result};
use chrono::Utc;
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};
use std::{path::Path, str::FromStr};
use uuid::Uuid;

/// A previously analyzed DNA grid and its verdict.
///
/// `sequence` is the canonical key: the grid's rows joined with `,`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DnaRecordRow {
    pub id: String,
    pub sequence: String,
    pub mutant: bool,
    pub analyzed_at: String,
}

#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub async fn new(data_dir: &Path) -> Result<Self> {
        Self::new_with_slow_query(data_dir, 0).await
    }

    /// Create storage with slow-query logging enabled.
    ///
    /// `slow_query_ms` is the threshold in milliseconds — queries exceeding it
    /// are logged at WARN level. Set to 0 to disable slow-query logging.
    pub async fn new_with_slow_query(data_dir: &Path, slow_query_ms: u64) -> Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;
        let db_path = data_dir.join("mutantd.db");
        let mut opts =
            SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", db_path.display()))?
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .create_if_missing(true);

        if slow_query_ms > 0 {
            use sqlx::ConnectOptions as _;
            opts = opts.log_slow_statements(
                log::LevelFilter::Warn,
                std::time::Duration::from_millis(slow_query_ms),
            );
        }

        let pool = SqlitePool::connect_with(opts).await?;
        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    /// Return a clone of the connection pool (cheap — Arc-backed).
    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    async fn migrate(pool: &SqlitePool) -> Result<()> {
        sqlx::migrate!("src/storage/migrations")
            .run(pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    // ─── DNA records ────────────────────────────────────────────────────────

    /// Look up a previously analyzed sequence by its canonical key.
    pub async fn find_by_sequence(&self, sequence: &str) -> Result<Option<DnaRecordRow>> {
        Ok(
            sqlx::query_as("SELECT * FROM dna_records WHERE sequence = ?")
                .bind(sequence)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    /// Persist a verdict for a canonical sequence.
    ///
    /// Idempotent: re-saving the same sequence refreshes the verdict instead
    /// of inserting a duplicate, so stats count each distinct grid once.
    pub async fn save_record(&self, sequence: &str, mutant: bool) -> Result<DnaRecordRow> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO dna_records (id, sequence, mutant, analyzed_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(sequence) DO UPDATE SET
               mutant = excluded.mutant,
               analyzed_at = excluded.analyzed_at",
        )
        .bind(&id)
        .bind(sequence)
        .bind(mutant)
        .bind(&now)
        .execute(&self.pool)
        .await?;
        self.find_by_sequence(sequence)
            .await?
            .ok_or_else(|| anyhow::anyhow!("dna record not found after insert"))
    }

    /// Count of (mutant, human) verdicts over all distinct analyzed sequences.
    pub async fn verdict_counts(&self) -> Result<(u64, u64)> {
        let row: (i64, i64) = sqlx::query_as(
            "SELECT
               COALESCE(SUM(CASE WHEN mutant THEN 1 ELSE 0 END), 0),
               COALESCE(SUM(CASE WHEN mutant THEN 0 ELSE 1 END), 0)
             FROM dna_records",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok((row.0 as u64, row.1 as u64))
    }

    pub async fn count_records(&self) -> Result<u64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM dna_records")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0 as u64)
    }
}
