use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::logic::{IncidentFilter, ReferenceFilter};
use crate::model::{CrimeCode, Incident, Neighborhood};
use crate::store::traits::{IncidentStore, ReferenceStore};

/// SQLite-backed storage gateway. All caller-supplied values reach the
/// database through positional bind parameters; the only interpolated
/// query fragments are the placeholder lists and the validated row limit.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the SQLite database at the given URL,
    /// e.g. `sqlite://stpaul_crime.sqlite3`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .context("Invalid SQLite database URL")?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .context("Failed to open SQLite database")?;

        Ok(Self { pool })
    }

    /// Open an in-memory database for tests and demos. The pool is
    /// pinned to a single connection: every `:memory:` connection is its
    /// own database, so a second connection would see no tables.
    pub async fn open_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory SQLite database")?;

        Ok(Self { pool })
    }

    /// Create the incident and reference tables if they do not exist.
    pub async fn migrate(&self) -> Result<()> {
        let statements = [
            "CREATE TABLE IF NOT EXISTS Incidents (
                case_number TEXT PRIMARY KEY,
                date_time TEXT NOT NULL,
                code INTEGER NOT NULL,
                incident TEXT NOT NULL,
                police_grid INTEGER NOT NULL,
                neighborhood_number INTEGER NOT NULL,
                block TEXT NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS Codes (
                code INTEGER PRIMARY KEY,
                incident_type TEXT NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS Neighborhoods (
                neighborhood_number INTEGER PRIMARY KEY,
                neighborhood_name TEXT NOT NULL
            )",
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .context("Failed to create tables")?;
        }

        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run a read query with positionally bound parameters.
    async fn select(&self, sql: &str, params: &[String]) -> Result<Vec<SqliteRow>> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = query.bind(param.as_str());
        }
        query
            .fetch_all(&self.pool)
            .await
            .context("Query failed")
    }
}

#[async_trait::async_trait]
impl ReferenceStore for SqliteStore {
    async fn list_codes(&self, filter: &ReferenceFilter) -> Result<Vec<CrimeCode>> {
        let predicate = filter.predicate("code");
        let sql = format!(
            "SELECT code, incident_type FROM Codes {} ORDER BY code",
            predicate.where_clause()
        );

        let rows = self.select(&sql, predicate.params()).await?;
        Ok(rows
            .into_iter()
            .map(|row| CrimeCode {
                code: row.get("code"),
                incident_type: row.get("incident_type"),
            })
            .collect())
    }

    async fn list_neighborhoods(&self, filter: &ReferenceFilter) -> Result<Vec<Neighborhood>> {
        let predicate = filter.predicate("neighborhood_number");
        let sql = format!(
            "SELECT neighborhood_number, neighborhood_name FROM Neighborhoods {} ORDER BY neighborhood_number",
            predicate.where_clause()
        );

        let rows = self.select(&sql, predicate.params()).await?;
        Ok(rows
            .into_iter()
            .map(|row| Neighborhood {
                neighborhood_number: row.get("neighborhood_number"),
                neighborhood_name: row.get("neighborhood_name"),
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl IncidentStore for SqliteStore {
    async fn list_incidents(&self, filter: &IncidentFilter) -> Result<Vec<Incident>> {
        let predicate = filter.predicate();
        let sql = format!(
            "SELECT case_number, date_time, code, incident, police_grid, neighborhood_number, block \
             FROM Incidents {} ORDER BY date_time DESC LIMIT {}",
            predicate.where_clause(),
            filter.row_limit()
        );

        let rows = self.select(&sql, predicate.params()).await?;
        Ok(rows
            .into_iter()
            .map(|row| Incident {
                case_number: row.get("case_number"),
                date_time: row.get("date_time"),
                code: row.get("code"),
                incident: row.get("incident"),
                police_grid: row.get("police_grid"),
                neighborhood_number: row.get("neighborhood_number"),
                block: row.get("block"),
            })
            .collect())
    }

    async fn insert_incident(&self, incident: &Incident) -> Result<bool> {
        // Single conditional statement: concurrent inserts of the same
        // case number serialize at the storage engine and exactly one
        // reports a row affected.
        let result = sqlx::query(
            "INSERT INTO Incidents (case_number, date_time, code, incident, police_grid, neighborhood_number, block) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(case_number) DO NOTHING",
        )
        .bind(&incident.case_number)
        .bind(&incident.date_time)
        .bind(incident.code)
        .bind(&incident.incident)
        .bind(incident.police_grid)
        .bind(incident.neighborhood_number)
        .bind(&incident.block)
        .execute(&self.pool)
        .await
        .context("Failed to insert incident")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_incident(&self, case_number: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM Incidents WHERE case_number = ?")
            .bind(case_number)
            .execute(&self.pool)
            .await
            .context("Failed to delete incident")?;

        Ok(result.rows_affected() > 0)
    }
}
