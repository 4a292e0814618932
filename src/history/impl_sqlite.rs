use crate::category::Category;
use crate::history::interface::{HistoryError, HistoryStore, NewPrediction, Prediction};
use crate::library::logger::interface::Logger;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, Connection, Row};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

const PREDICTION_COLUMNS: &str =
    "id, category, confidence, image_data, timestamp, client_descriptor";

/// SQLite-backed prediction history.
///
/// A single connection behind a mutex serializes all reads and writes, so
/// appends, deletes and clears never interleave.
pub struct HistoryStoreSqlite {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl HistoryStoreSqlite {
    /// Opens (or creates) the database file, creating parent directories as needed.
    pub fn open(
        db_path: &Path,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, HistoryError> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        let store = Self::from_connection(conn, Some(db_path.to_path_buf()), logger)?;

        let _ = store
            .logger
            .info(&format!("Database initialized at {}", db_path.display()));

        Ok(store)
    }

    pub fn open_in_memory(logger: Arc<dyn Logger + Send + Sync>) -> Result<Self, HistoryError> {
        Self::from_connection(Connection::open_in_memory()?, None, logger)
    }

    fn from_connection(
        conn: Connection,
        db_path: Option<PathBuf>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, HistoryError> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
            logger: logger.with_namespace("history").with_namespace("sqlite"),
        })
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, HistoryError> {
        self.conn.lock().map_err(|_| HistoryError::LockPoisoned)
    }

    pub fn count(&self) -> Result<i64, HistoryError> {
        let conn = self.connection()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM predictions", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn init_schema(conn: &Connection) -> Result<(), HistoryError> {
    // AUTOINCREMENT keeps ids from being reused after deletes or a clear.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS predictions (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            category            TEXT NOT NULL,
            confidence          REAL NOT NULL,
            image_data          TEXT NOT NULL,
            timestamp           TEXT NOT NULL,
            client_descriptor   TEXT NOT NULL DEFAULT ''
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_predictions_timestamp
         ON predictions(timestamp DESC)",
        [],
    )?;

    Ok(())
}

/// Fixed-width UTC timestamps, so text order matches time order.
fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn prediction_from_row(row: &Row) -> rusqlite::Result<Prediction> {
    let category: String = row.get(1)?;
    let timestamp: String = row.get(4)?;
    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?;

    Ok(Prediction {
        id: row.get(0)?,
        category: Category::from_label(&category),
        confidence: row.get(2)?,
        image: row.get(3)?,
        timestamp,
        client_descriptor: row.get(5)?,
    })
}

impl HistoryStore for HistoryStoreSqlite {
    fn append(&self, prediction: NewPrediction) -> Result<Prediction, HistoryError> {
        // NaN fails the range check too.
        if !(0.0..=100.0).contains(&prediction.confidence) {
            return Err(HistoryError::InvalidConfidence(prediction.confidence));
        }

        // Clock is read under the lock so timestamp order follows id order.
        let conn = self.connection()?;
        let timestamp = Utc::now().trunc_subsecs(6);

        conn.execute(
            "INSERT INTO predictions (category, confidence, image_data, timestamp, client_descriptor)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                prediction.category.label(),
                prediction.confidence,
                prediction.image,
                format_timestamp(&timestamp),
                prediction.client_descriptor,
            ],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);

        let _ = self.logger.info(&format!(
            "Stored prediction {} ({} {:.2}%)",
            id, prediction.category, prediction.confidence
        ));

        Ok(Prediction {
            id,
            category: prediction.category,
            confidence: prediction.confidence,
            image: prediction.image,
            timestamp,
            client_descriptor: prediction.client_descriptor,
        })
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<Prediction>, HistoryError> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM predictions ORDER BY timestamp DESC, id DESC LIMIT ?1",
            PREDICTION_COLUMNS
        ))?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], prediction_from_row)?;

        let mut predictions = Vec::new();
        for prediction in rows {
            predictions.push(prediction?);
        }

        Ok(predictions)
    }

    fn delete(&self, id: i64) -> Result<(), HistoryError> {
        let deleted = self
            .connection()?
            .execute("DELETE FROM predictions WHERE id = ?1", params![id])?;

        if deleted == 0 {
            return Err(HistoryError::NotFound(id));
        }

        let _ = self.logger.info(&format!("Deleted prediction {}", id));
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        let deleted = self.connection()?.execute("DELETE FROM predictions", [])?;
        let _ = self
            .logger
            .info(&format!("Cleared history ({} predictions)", deleted));
        Ok(())
    }
}

impl std::fmt::Debug for HistoryStoreSqlite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStoreSqlite")
            .field("db_path", &self.db_path)
            .finish()
    }
}
