use crate::category::RawConfidence;
use image::DynamicImage;

/// Raw classifier output before display mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub class_id: String,
    pub confidence: RawConfidence,
}

#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("failed to load model from {path}: {message}")]
    ModelLoad { path: String, message: String },
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("model produced {actual} scores, expected {expected}")]
    UnexpectedOutput { expected: usize, actual: usize },
}

pub trait ImageClassifier {
    fn classify(&self, image: &DynamicImage) -> Result<Classification, ClassificationError>;
}
