//! Pure crop-box calculations.
//!
//! All functions here are pure and testable without any I/O or images.

/// How far `w/h` may drift from the target ratio before we bother cropping.
///
/// Avoids shaving a row or column off images that already match the target
/// ratio up to floating-point noise.
const RATIO_EPSILON: f64 = 1e-6;

/// A centered crop region inside a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    /// Left offset in pixels.
    pub x: u32,
    /// Top offset in pixels.
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Calculate the centered crop box that brings `width`×`height` to `ratio`.
///
/// Returns `None` when the image already matches the target ratio (within
/// [`RATIO_EPSILON`]) — callers treat that as a no-op. The crop only ever
/// shrinks one edge; nothing is upscaled.
///
/// The shortened edge is rounded to the nearest pixel, so the result matches
/// the target ratio within one-pixel rounding:
///
/// ```
/// # use lora_prep::imaging::geometry::crop_box_for_ratio;
/// // 1000x1000 to 2:3 portrait → keep full height, crop width to 667
/// let b = crop_box_for_ratio(1000, 1000, 2.0 / 3.0).unwrap();
/// assert_eq!((b.width, b.height), (667, 1000));
///
/// // 1000x1000 to 3:2 landscape → keep full width, crop height to 667
/// let b = crop_box_for_ratio(1000, 1000, 3.0 / 2.0).unwrap();
/// assert_eq!((b.width, b.height), (1000, 667));
/// ```
pub fn crop_box_for_ratio(width: u32, height: u32, ratio: f64) -> Option<CropBox> {
    if width == 0 || height == 0 {
        return None;
    }

    let current = width as f64 / height as f64;
    if (current - ratio).abs() < RATIO_EPSILON {
        return None;
    }

    if current > ratio {
        // Too wide: keep full height, trim the sides symmetrically
        let new_w = ((height as f64 * ratio).round() as u32).clamp(1, width);
        if new_w == width {
            return None;
        }
        Some(CropBox {
            x: (width - new_w) / 2,
            y: 0,
            width: new_w,
            height,
        })
    } else {
        // Too tall: keep full width, trim top and bottom symmetrically
        let new_h = ((width as f64 / ratio).round() as u32).clamp(1, height);
        if new_h == height {
            return None;
        }
        Some(CropBox {
            x: 0,
            y: (height - new_h) / 2,
            width,
            height: new_h,
        })
    }
}
