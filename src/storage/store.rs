//! Append-only SQLite store of analysis results

use crate::error::Result;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;

/// A stored analysis row. Column names double as CSV headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PersistedRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub filename: String,
    pub job_category: String,
    pub role: String,
    pub similarity: f64,
    pub matched_skills: String,
    pub skill_gaps: String,
}

/// A row waiting to be appended; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCandidate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub filename: String,
    pub job_category: String,
    pub role: String,
    pub similarity: f64,
    pub matched_skills: String,
    pub skill_gaps: String,
}

/// Handle to the candidates table. Rows are only ever inserted.
#[derive(Clone)]
pub struct CandidateStore {
    pool: SqlitePool,
}

impl CandidateStore {
    /// Open (creating if needed) the database file at `path`
    pub async fn open(path: &Path) -> Result<Self> {
        info!("Opening candidate store at {}", path.display());

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        // single writer
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    /// Private in-memory database, used by tests and dry runs
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS candidates (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                email TEXT,
                phone TEXT,
                filename TEXT,
                job_category TEXT,
                role TEXT,
                similarity REAL,
                matched_skills TEXT,
                skill_gaps TEXT
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    /// Append one row and return its id
    pub async fn append(&self, row: &NewCandidate) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO candidates
                (name, email, phone, filename, job_category, role, similarity, matched_skills, skill_gaps)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.name)
        .bind(&row.email)
        .bind(&row.phone)
        .bind(&row.filename)
        .bind(&row.job_category)
        .bind(&row.role)
        .bind(row.similarity)
        .bind(&row.matched_skills)
        .bind(&row.skill_gaps)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Stored candidate row {} ({})", id, row.filename);
        Ok(id)
    }

    /// Every stored row in insertion order
    pub async fn load_all(&self) -> Result<Vec<PersistedRow>> {
        let rows = sqlx::query_as::<_, PersistedRow>(
            r#"
            SELECT id, name, email, phone, filename, job_category, role,
                   similarity, matched_skills, skill_gaps
            FROM candidates
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM candidates")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
