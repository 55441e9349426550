//! In-memory image operations for dataset preparation.
//!
//! Everything works on decoded RGB8 buffers — no file paths, no temp files.
//! The pipeline hands each buffer forward through decode → crop → resize →
//! encode and never touches it again.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Orientation | `ImageDecoder::orientation` + `DynamicImage::apply_orientation` |
//! | Crop | `image::imageops::crop_imm` |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` at fixed quality |

use super::geometry::crop_box_for_ratio;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader, RgbImage};
use std::io::Cursor;
use thiserror::Error;

/// Fixed JPEG encoding quality for all emitted dataset images.
pub const JPEG_QUALITY: u8 = 92;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("JPEG encode failed: {0}")]
    Encode(String),
}

/// Decode raw image bytes into an RGB8 buffer with EXIF orientation applied.
///
/// Orientation metadata is consumed here, so the returned pixels always match
/// the intended display orientation regardless of how the camera stored them.
pub fn decode_oriented(bytes: &[u8]) -> Result<RgbImage, ImagingError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ImagingError::Decode(e.to_string()))?;
    let mut decoder = reader
        .into_decoder()
        .map_err(|e| ImagingError::Decode(e.to_string()))?;
    // Formats without orientation metadata report NoTransforms
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let mut img =
        DynamicImage::from_decoder(decoder).map_err(|e| ImagingError::Decode(e.to_string()))?;
    img.apply_orientation(orientation);
    Ok(img.into_rgb8())
}

/// Center-crop an image to the target width/height ratio.
///
/// Returns the image unchanged when it already matches the ratio. Only ever
/// crops — never upscales.
pub fn center_crop_to_ratio(img: RgbImage, ratio: f64) -> RgbImage {
    match crop_box_for_ratio(img.width(), img.height(), ratio) {
        None => img,
        Some(b) => image::imageops::crop_imm(&img, b.x, b.y, b.width, b.height).to_image(),
    }
}

/// Resize to exactly `width`×`height` with Lanczos3 resampling.
///
/// Does not preserve aspect ratio — run [`center_crop_to_ratio`] first.
pub fn resize_exact(img: &RgbImage, width: u32, height: u32) -> RgbImage {
    image::imageops::resize(img, width, height, FilterType::Lanczos3)
}

/// Encode an RGB8 buffer as JPEG at [`JPEG_QUALITY`].
pub fn encode_jpeg(img: &RgbImage) -> Result<Vec<u8>, ImagingError> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut buf), JPEG_QUALITY);
    img.write_with_encoder(encoder)
        .map_err(|e| ImagingError::Encode(e.to_string()))?;
    Ok(buf)
}
