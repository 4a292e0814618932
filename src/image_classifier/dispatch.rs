use crate::category::{map_prediction, MappedPrediction};
use crate::image_classifier::availability::ModelAvailability;
use crate::image_classifier::impl_fake::{DemoRequest, ImageClassifierDemo};
use crate::image_classifier::interface::ClassificationError;
use crate::image_decoder::DecodedImage;
use crate::library::logger::interface::Logger;
use std::sync::Arc;

/// Routes a decoded image to the trained model, or to the demo classifier when there is none.
pub struct ClassificationDispatcher {
    availability: ModelAvailability,
    demo: ImageClassifierDemo,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ClassificationDispatcher {
    pub fn new(availability: ModelAvailability, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        let logger = logger.with_namespace("classifier");
        let _ = logger.info(&format!("Model {:?}", availability));
        Self {
            demo: ImageClassifierDemo::new(logger.clone()),
            availability,
            logger,
        }
    }

    pub fn availability(&self) -> &ModelAvailability {
        &self.availability
    }

    /// The demo request is ignored when a model is available.
    pub fn dispatch(
        &self,
        image: &DecodedImage,
        demo_request: &DemoRequest,
    ) -> Result<MappedPrediction, ClassificationError> {
        let _ = self.logger.info(&format!(
            "Classifying {}x{} {} image ({} bytes, {} channels)",
            image.width(),
            image.height(),
            image.mime,
            image.bytes.len(),
            image.channels()
        ));

        let classification = match &self.availability {
            ModelAvailability::Available(model) => model.classify(&image.image).map_err(|e| {
                let _ = self.logger.error(&format!("Classification failed: {}", e));
                e
            })?,
            ModelAvailability::Unavailable => self.demo.classify(demo_request),
        };

        Ok(map_prediction(
            &classification.class_id,
            classification.confidence,
        ))
    }
}
