use crate::category::{RawConfidence, FIXED_CLASSES};
use crate::image_classifier::interface::{Classification, ClassificationError, ImageClassifier};
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::tract::image::image_to_tensor;
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::Arc;
use tract_onnx::prelude::*;

pub struct ImageClassifierTract {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTract {
    pub fn new(
        config: ModelConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, ClassificationError> {
        let (height, width) = config.input_shape;
        let shape = config.layout.input_shape(height, width);

        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)
            .and_then(|model| {
                model.with_input_fact(
                    0,
                    InferenceFact::dt_shape(
                        f32::datum_type(),
                        tvec!(shape[0], shape[1], shape[2], shape[3]),
                    ),
                )
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| ClassificationError::ModelLoad {
                path: config.onnx_model_path.clone(),
                message: e.to_string(),
            })?;

        let logger = logger.with_namespace("tract");
        let _ = logger.info(&format!(
            "Loaded model {} with input {:?}",
            config.onnx_model_path, shape
        ));

        Ok(Self {
            model,
            config,
            logger,
        })
    }

    fn scores(&self, image: &DynamicImage) -> Result<Vec<f32>, ClassificationError> {
        let (height, width) = self.config.input_shape;
        let input = image_to_tensor(image, height, width, self.config.layout);

        let outputs = self
            .model
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| ClassificationError::Inference(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| {
                ClassificationError::Inference("model returned no outputs".to_string())
            })?
            .to_array_view::<f32>()
            .map_err(|e| ClassificationError::Inference(e.to_string()))?;

        Ok(output.iter().copied().collect())
    }
}

impl ImageClassifier for ImageClassifierTract {
    fn classify(&self, image: &DynamicImage) -> Result<Classification, ClassificationError> {
        let scores = self.scores(image)?;
        let classification = classification_from_scores(&scores)?;

        let _ = self.logger.info(&format!(
            "Scores {:?} -> {}",
            scores, classification.class_id
        ));

        Ok(classification)
    }
}

/// Picks the highest score; on ties the lowest index wins.
pub fn classification_from_scores(scores: &[f32]) -> Result<Classification, ClassificationError> {
    if scores.len() != FIXED_CLASSES.len() {
        return Err(ClassificationError::UnexpectedOutput {
            expected: FIXED_CLASSES.len(),
            actual: scores.len(),
        });
    }

    let mut best_index = 0;
    for (index, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best_index] {
            best_index = index;
        }
    }

    Ok(Classification {
        class_id: FIXED_CLASSES[best_index].to_string(),
        confidence: RawConfidence::Unit(scores[best_index]),
    })
}
