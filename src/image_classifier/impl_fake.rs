use crate::category::{RawConfidence, FIXED_CLASSES};
use crate::image_classifier::interface::Classification;
use crate::library::logger::interface::Logger;
use rand::Rng;
use std::ops::RangeInclusive;
use std::sync::Arc;

pub const HINTED_CONFIDENCE: RangeInclusive<f64> = 90.0..=98.0;
pub const RANDOM_CONFIDENCE: RangeInclusive<f64> = 75.0..=95.0;

/// What the demo classifier should do for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoRequest {
    /// The caller already knows the category, e.g. a bundled demo image.
    Hinted(String),
    Random,
}

impl From<Option<String>> for DemoRequest {
    fn from(hint: Option<String>) -> Self {
        match hint {
            Some(category) if !category.trim().is_empty() => {
                DemoRequest::Hinted(category.trim().to_string())
            }
            _ => DemoRequest::Random,
        }
    }
}

/// Stands in for the model when no trained artifact is available.
pub struct ImageClassifierDemo {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierDemo {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("demo"),
        }
    }

    pub fn classify(&self, request: &DemoRequest) -> Classification {
        let mut rng = rand::rng();

        let classification = match request {
            DemoRequest::Hinted(category) => Classification {
                class_id: category.clone(),
                confidence: RawConfidence::Percent(rng.random_range(HINTED_CONFIDENCE)),
            },
            DemoRequest::Random => Classification {
                class_id: FIXED_CLASSES[rng.random_range(0..FIXED_CLASSES.len())].to_string(),
                confidence: RawConfidence::Percent(rng.random_range(RANDOM_CONFIDENCE)),
            },
        };

        let _ = self.logger.info(&format!(
            "Demo classification for {:?}: {:?}",
            request, classification
        ));

        classification
    }
}
