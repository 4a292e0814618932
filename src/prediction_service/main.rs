use crate::category::MappedPrediction;
use crate::config::Config;
use crate::history::interface::{HistoryError, HistoryStore, NewPrediction, Prediction};
use crate::image_classifier::dispatch::ClassificationDispatcher;
use crate::image_classifier::impl_fake::DemoRequest;
use crate::image_classifier::interface::ClassificationError;
use crate::image_decoder::{decode_data_uri, DecodeError};
use crate::library::logger::interface::Logger;
use crate::prediction_service::demo_images::list_demo_images;
use crate::prediction_service::response::{
    ClassifyResponse, DemoImagesResponse, HealthResponse, HistoryEntry, HistoryResponse,
    SuccessResponse,
};
use crate::thumbnail::{generate_thumbnail, ThumbnailOutcome};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Classification(#[from] ClassificationError),
}

/// Entry point for every operation the boundary layer exposes.
pub struct PredictionService {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    dispatcher: ClassificationDispatcher,
    history: Arc<dyn HistoryStore + Send + Sync>,
}

impl PredictionService {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        dispatcher: ClassificationDispatcher,
        history: Arc<dyn HistoryStore + Send + Sync>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("service"),
            dispatcher,
            history,
        }
    }

    /// Decodes and classifies without touching history.
    ///
    /// Decoding always runs first, so a malformed payload fails even when the
    /// demo classifier would not need the pixels.
    pub fn dispatch(
        &self,
        image: &str,
        demo_category: Option<String>,
    ) -> Result<MappedPrediction, DispatchError> {
        let decoded = decode_data_uri(image)?;
        let demo_request = DemoRequest::from(demo_category);
        Ok(self.dispatcher.dispatch(&decoded, &demo_request)?)
    }

    /// Classifies and, on success, records the prediction.
    ///
    /// Decode and classification failures come back as a failed response;
    /// only storage failures are returned as errors.
    pub fn classify(
        &self,
        image: &str,
        demo_category: Option<String>,
        client_descriptor: &str,
    ) -> Result<ClassifyResponse, HistoryError> {
        let prediction = match self.dispatch(image, demo_category) {
            Ok(prediction) => prediction,
            Err(e) => {
                let _ = self.logger.warn(&format!("Classification rejected: {}", e));
                return Ok(ClassifyResponse::failure(e.to_string()));
            }
        };

        let stored = self.append_history(NewPrediction {
            category: prediction.category,
            confidence: prediction.confidence,
            image: image.to_string(),
            client_descriptor: client_descriptor.to_string(),
        })?;

        Ok(ClassifyResponse::success(prediction, Some(stored.id)))
    }

    pub fn append_history(&self, prediction: NewPrediction) -> Result<Prediction, HistoryError> {
        self.history.append(prediction).map_err(|e| {
            let _ = self.logger.error(&format!("Failed to store prediction: {}", e));
            e
        })
    }

    pub fn list_history(&self, limit: Option<usize>) -> Result<HistoryResponse, HistoryError> {
        let limit = limit.unwrap_or(self.config.history_default_limit);
        let history = self
            .history
            .list_recent(limit)?
            .into_iter()
            .map(|prediction| {
                let thumbnail = self.thumbnail_for(&prediction);
                HistoryEntry::new(prediction, thumbnail)
            })
            .collect();

        Ok(HistoryResponse {
            success: true,
            history,
        })
    }

    fn thumbnail_for(&self, prediction: &Prediction) -> String {
        let outcome = generate_thumbnail(&prediction.image, self.config.thumbnail);
        if let ThumbnailOutcome::Fallback { reason, .. } = &outcome {
            let _ = self.logger.warn(&format!(
                "Thumbnail for prediction {} fell back to original: {}",
                prediction.id, reason
            ));
        }
        outcome.into_payload()
    }

    pub fn delete_history_entry(&self, id: i64) -> Result<SuccessResponse, HistoryError> {
        self.history.delete(id)?;
        Ok(SuccessResponse::ok())
    }

    pub fn clear_history(&self) -> Result<SuccessResponse, HistoryError> {
        self.history.clear()?;
        Ok(SuccessResponse::ok())
    }

    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: "ok".to_string(),
        }
    }

    pub fn demo_images(&self, category: &str) -> DemoImagesResponse {
        let images = list_demo_images(&self.config.dataset_dir, category).unwrap_or_else(|e| {
            let _ = self
                .logger
                .warn(&format!("Could not list demo images for {}: {}", category, e));
            Vec::new()
        });

        DemoImagesResponse { images }
    }

    pub fn model_available(&self) -> bool {
        self.dispatcher.availability().is_available()
    }
}
