use crate::category::{Category, MappedPrediction};
use crate::history::interface::Prediction;
use chrono::SecondsFormat;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClassifyResponse {
    Success {
        category: Category,
        confidence: f64,
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        prediction_id: Option<i64>,
    },
    Failure {
        error: String,
        success: bool,
    },
}

impl ClassifyResponse {
    pub fn success(prediction: MappedPrediction, prediction_id: Option<i64>) -> Self {
        ClassifyResponse::Success {
            category: prediction.category,
            confidence: prediction.confidence,
            success: true,
            prediction_id,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        ClassifyResponse::Failure {
            error: error.into(),
            success: false,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ClassifyResponse::Success { .. })
    }
}

/// A stored prediction plus a preview derived at response time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub category: Category,
    pub confidence: f64,
    pub image_data: String,
    pub timestamp: String,
    pub client_descriptor: String,
    pub thumbnail: String,
}

impl HistoryEntry {
    pub fn new(prediction: Prediction, thumbnail: String) -> Self {
        Self {
            id: prediction.id,
            category: prediction.category,
            confidence: prediction.confidence,
            timestamp: prediction
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Micros, true),
            image_data: prediction.image,
            client_descriptor: prediction.client_descriptor,
            thumbnail,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoImagesResponse {
    pub images: Vec<String>,
}
