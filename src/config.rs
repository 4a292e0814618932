use crate::image_classifier::models::model_config::{ModelConfig, TensorLayout};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailConfig {
    pub max_width: u32,
    pub max_height: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub model: ModelConfig,
    pub dataset_dir: PathBuf,
    pub history_default_limit: usize,
    pub thumbnail: ThumbnailConfig,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("eco_sort.db"),
            model: ModelConfig {
                onnx_model_path: "waste_model.onnx".to_string(),
                input_shape: (224, 224),
                layout: TensorLayout::Nhwc,
            },
            dataset_dir: PathBuf::from("dataset"),
            history_default_limit: 10,
            thumbnail: ThumbnailConfig {
                max_width: 150,
                max_height: 100,
            },
            logger_timezone: utc(),
        }
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::FixedOffset::east_opt(0).expect("zero offset is always in range")
}

/// Converts a whole-hour offset into a timezone, rejecting anything outside +-23h.
pub fn timezone_from_hours(hours: i32) -> Option<chrono::FixedOffset> {
    hours
        .checked_mul(3600)
        .and_then(chrono::FixedOffset::east_opt)
}
