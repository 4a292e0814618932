//! Display categories and the mapping from raw classifier output to them.

use serde::Serialize;
use std::fmt;

/// Class identifiers in the index order of the trained model's output vector.
pub const FIXED_CLASSES: [&str; 4] = ["glass", "metal", "paper", "plastic"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Glass,
    Metal,
    Paper,
    Plastic,
    Other,
}

impl Category {
    /// Maps an internal class identifier to its display label. Unknown identifiers become `Other`.
    pub fn from_class_id(class_id: &str) -> Self {
        match class_id.trim().to_ascii_lowercase().as_str() {
            "glass" => Category::Glass,
            "metal" => Category::Metal,
            "paper" => Category::Paper,
            "plastic" => Category::Plastic,
            _ => Category::Other,
        }
    }

    /// Parses a stored display label back into a category.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Glass" => Category::Glass,
            "Metal" => Category::Metal,
            "Paper" => Category::Paper,
            "Plastic" => Category::Plastic,
            _ => Category::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Glass => "Glass",
            Category::Metal => "Metal",
            Category::Paper => "Paper",
            Category::Plastic => "Plastic",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw confidence as produced by a classifier, tagged with its scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawConfidence {
    /// Probability in [0, 1], as emitted by the model.
    Unit(f32),
    /// Already a percentage, as produced by the demo fallback.
    Percent(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedPrediction {
    pub category: Category,
    pub confidence: f64,
}

pub fn map_prediction(class_id: &str, raw: RawConfidence) -> MappedPrediction {
    MappedPrediction {
        category: Category::from_class_id(class_id),
        confidence: to_percentage(raw),
    }
}

pub fn to_percentage(raw: RawConfidence) -> f64 {
    let percent = match raw {
        RawConfidence::Unit(value) => f64::from(value) * 100.0,
        RawConfidence::Percent(value) => value,
    };

    if percent.is_nan() {
        return 0.0;
    }

    round_to_hundredths(percent.clamp(0.0, 100.0))
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
