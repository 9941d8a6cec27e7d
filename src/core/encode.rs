use crate::common::Result;
use base64::{engine::general_purpose::STANDARD, Engine};
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, RgbImage};

pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Encode an RGB image as baseline JPEG at the given quality (1-100).
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
        encoder.encode(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)?;
    }
    Ok(buffer)
}

pub fn jpeg_data_uri(jpeg: &[u8]) -> String {
    format!("{}{}", JPEG_DATA_URI_PREFIX, STANDARD.encode(jpeg))
}

pub fn kilobytes(bytes: usize) -> f64 {
    bytes as f64 / 1024.0
}
