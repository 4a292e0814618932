use crate::image_classifier::impl_tract::ImageClassifierTract;
use crate::image_classifier::interface::ImageClassifier;
use crate::image_classifier::models::model_config::ModelConfig;
use crate::library::logger::interface::Logger;
use std::path::Path;
use std::sync::Arc;

/// Whether a trained model was loaded at startup. Decided once and never changed.
#[derive(Clone)]
pub enum ModelAvailability {
    Available(Arc<dyn ImageClassifier + Send + Sync>),
    Unavailable,
}

impl ModelAvailability {
    pub fn load(config: &ModelConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        if !Path::new(&config.onnx_model_path).exists() {
            let _ = logger.warn(&format!(
                "Model {} not found, using demo predictions",
                config.onnx_model_path
            ));
            return ModelAvailability::Unavailable;
        }

        match ImageClassifierTract::new(config.clone(), logger.clone()) {
            Ok(classifier) => ModelAvailability::Available(Arc::new(classifier)),
            Err(e) => {
                let _ = logger.warn(&format!("{}, using demo predictions", e));
                ModelAvailability::Unavailable
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ModelAvailability::Available(_))
    }
}

impl std::fmt::Debug for ModelAvailability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelAvailability::Available(_) => f.write_str("Available"),
            ModelAvailability::Unavailable => f.write_str("Unavailable"),
        }
    }
}
