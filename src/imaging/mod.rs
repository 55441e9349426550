//! Image geometry — pure Rust, zero external dependencies.
//!
//! The module is split into:
//! - **Geometry**: pure crop-box math (unit testable without pixels)
//! - **Operations**: decode, orient, crop, resize, and encode on in-memory
//!   buffers via the `image` crate

pub mod geometry;
pub mod operations;

pub use operations::{
    ImagingError, JPEG_QUALITY, center_crop_to_ratio, decode_oriented, encode_jpeg, resize_exact,
};
