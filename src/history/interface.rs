use crate::category::Category;
use chrono::{DateTime, Utc};

/// Fields supplied by the caller; id and timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPrediction {
    pub category: Category,
    pub confidence: f64,
    pub image: String,
    pub client_descriptor: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub id: i64,
    pub category: Category,
    pub confidence: f64,
    pub image: String,
    pub timestamp: DateTime<Utc>,
    pub client_descriptor: String,
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("prediction {0} not found")]
    NotFound(i64),
    #[error("confidence {0} is outside 0-100")]
    InvalidConfidence(f64),
    #[error("history database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("history storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("history store lock was poisoned")]
    LockPoisoned,
}

impl HistoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, HistoryError::NotFound(_))
    }
}

pub trait HistoryStore {
    fn append(&self, prediction: NewPrediction) -> Result<Prediction, HistoryError>;
    /// Most recent first.
    fn list_recent(&self, limit: usize) -> Result<Vec<Prediction>, HistoryError>;
    fn delete(&self, id: i64) -> Result<(), HistoryError>;
    fn clear(&self) -> Result<(), HistoryError>;
}
