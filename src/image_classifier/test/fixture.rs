use crate::image_classifier::availability::ModelAvailability;
use crate::image_classifier::dispatch::ClassificationDispatcher;
use crate::image_classifier::impl_tract::classification_from_scores;
use crate::image_classifier::interface::{
    Classification, ClassificationError, ImageClassifier,
};
use crate::library::logger::{impl_console::LoggerConsole, interface::Logger};
use image::DynamicImage;
use std::sync::Arc;

/// Model stand-in that always emits the same score vector.
pub struct ImageClassifierFixedScores {
    pub scores: Vec<f32>,
}

impl ImageClassifier for ImageClassifierFixedScores {
    fn classify(&self, _image: &DynamicImage) -> Result<Classification, ClassificationError> {
        classification_from_scores(&self.scores)
    }
}

pub struct ImageClassifierBroken;

impl ImageClassifier for ImageClassifierBroken {
    fn classify(&self, _image: &DynamicImage) -> Result<Classification, ClassificationError> {
        Err(ClassificationError::Inference(
            "tensor shape mismatch".to_string(),
        ))
    }
}

pub struct Fixture {
    pub logger: Arc<dyn Logger + Send + Sync>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            logger: Arc::new(LoggerConsole::new(
                chrono::FixedOffset::east_opt(0).unwrap(),
            )),
        }
    }

    pub fn demo_dispatcher(&self) -> ClassificationDispatcher {
        ClassificationDispatcher::new(ModelAvailability::Unavailable, self.logger.clone())
    }

    pub fn model_dispatcher(&self, scores: Vec<f32>) -> ClassificationDispatcher {
        ClassificationDispatcher::new(
            ModelAvailability::Available(Arc::new(ImageClassifierFixedScores { scores })),
            self.logger.clone(),
        )
    }

    pub fn broken_model_dispatcher(&self) -> ClassificationDispatcher {
        ClassificationDispatcher::new(
            ModelAvailability::Available(Arc::new(ImageClassifierBroken)),
            self.logger.clone(),
        )
    }
}
