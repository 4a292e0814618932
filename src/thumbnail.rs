//! On-demand previews of stored images. Nothing here is cached or persisted.

use crate::config::ThumbnailConfig;
use crate::image_decoder::{decode_data_uri, encode_png_data_uri, DecodeError};
use image::DynamicImage;

#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    #[error("stored image could not be decoded: {0}")]
    Decode(#[from] DecodeError),
    #[error("thumbnail could not be encoded: {0}")]
    Encode(#[from] image::ImageError),
}

#[derive(Debug)]
pub enum ThumbnailOutcome {
    Generated(String),
    /// The original payload, returned unchanged because a preview could not be made.
    Fallback {
        original: String,
        reason: ThumbnailError,
    },
}

impl ThumbnailOutcome {
    pub fn into_payload(self) -> String {
        match self {
            ThumbnailOutcome::Generated(payload) => payload,
            ThumbnailOutcome::Fallback { original, .. } => original,
        }
    }
}

pub fn generate_thumbnail(image: &str, bounds: ThumbnailConfig) -> ThumbnailOutcome {
    match try_generate_thumbnail(image, bounds) {
        Ok(payload) => ThumbnailOutcome::Generated(payload),
        Err(reason) => ThumbnailOutcome::Fallback {
            original: image.to_string(),
            reason,
        },
    }
}

fn try_generate_thumbnail(image: &str, bounds: ThumbnailConfig) -> Result<String, ThumbnailError> {
    let decoded = decode_data_uri(image)?;
    let scaled = fit_within(&decoded.image, bounds);
    Ok(encode_png_data_uri(&scaled)?)
}

/// Scales down to fit the bounds, keeping the aspect ratio. Never enlarges.
fn fit_within(image: &DynamicImage, bounds: ThumbnailConfig) -> DynamicImage {
    if image.width() <= bounds.max_width && image.height() <= bounds.max_height {
        return image.clone();
    }
    image.thumbnail(bounds.max_width, bounds.max_height)
}
