//! Decoding of `data:<mime>;base64,<payload>` image strings.

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageFormat};

const DATA_URI_SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("image payload is missing the data URI marker")]
    MissingMarker,
    #[error("image payload is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    #[error("image bytes are not a decodable image: {0}")]
    UnsupportedImage(#[from] image::ImageError),
}

#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub mime: String,
    pub bytes: Vec<u8>,
    pub image: DynamicImage,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn channels(&self) -> u8 {
        self.image.color().channel_count()
    }
}

/// Splits an encoded payload into its mime type and base64 body.
fn split_data_uri(encoded: &str) -> Result<(&str, &str), DecodeError> {
    let rest = encoded
        .trim()
        .strip_prefix(DATA_URI_SCHEME)
        .ok_or(DecodeError::MissingMarker)?;
    let marker = rest.find(BASE64_MARKER).ok_or(DecodeError::MissingMarker)?;
    let mime = &rest[..marker];
    let payload = &rest[marker + BASE64_MARKER.len()..];
    Ok((mime, payload))
}

fn decode_bytes(encoded: &str) -> Result<(String, Vec<u8>), DecodeError> {
    let (mime, payload) = split_data_uri(encoded)?;
    // MIME-style payloads may be wrapped across lines.
    let payload: Vec<u8> = payload
        .bytes()
        .filter(|byte| !byte.is_ascii_whitespace())
        .collect();
    let bytes = general_purpose::STANDARD.decode(payload)?;
    Ok((mime.to_string(), bytes))
}

pub fn decode_data_uri(encoded: &str) -> Result<DecodedImage, DecodeError> {
    let (mime, bytes) = decode_bytes(encoded)?;
    let image = image::load_from_memory(&bytes)?;
    Ok(DecodedImage { mime, bytes, image })
}

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!(
        "{}{}{}{}",
        DATA_URI_SCHEME,
        mime,
        BASE64_MARKER,
        general_purpose::STANDARD.encode(bytes)
    )
}

/// Wraps raw image file contents in a data URI, detecting the mime type from the bytes.
pub fn encode_image_file(bytes: &[u8]) -> Result<String, DecodeError> {
    let format = image::guess_format(bytes)?;
    Ok(encode_data_uri(format.to_mime_type(), bytes))
}

pub fn encode_png_data_uri(image: &DynamicImage) -> Result<String, image::ImageError> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(encode_data_uri(
        ImageFormat::Png.to_mime_type(),
        buffer.get_ref(),
    ))
}

#[cfg(test)]
pub mod test_images {
    use super::*;
    use image::{ImageBuffer, Rgb};

    pub fn solid_rgb(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, Rgb(color)))
    }

    pub fn png_data_uri(width: u32, height: u32) -> String {
        encode_png_data_uri(&solid_rgb(width, height, [30, 160, 90])).unwrap()
    }
}
