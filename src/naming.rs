//! Sequential destination names for dataset entries.
//!
//! Every output pair follows the same convention: a user prefix, an
//! underscore, and a 1-based zero-padded sequence number. The image file and
//! its caption sidecar share the stem and differ only in extension:
//!
//! ```text
//! influencer_0001.jpg
//! influencer_0001.txt
//! ```
//!
//! The sequence number is the entry's position in the *input* ordering, so a
//! skipped input leaves a gap rather than renumbering everything after it.
//! Names stay stable for a given source directory regardless of which items
//! fail to decode.

/// File stem for the entry at 1-based `index`: `{prefix}_{index:04}`.
///
/// The index is zero-padded to at least four digits; larger indices simply
/// grow wider.
pub fn stem_for(prefix: &str, index: usize) -> String {
    format!("{prefix}_{index:04}")
}

/// Destination image name for the entry at 1-based `index`.
pub fn image_name(prefix: &str, index: usize) -> String {
    format!("{}.jpg", stem_for(prefix, index))
}

/// Derive the caption sidecar name from an image name by swapping the
/// extension, guaranteeing an identical stem.
pub fn text_name_for(image_name: &str) -> String {
    match image_name.rsplit_once('.') {
        Some((stem, _)) => format!("{stem}.txt"),
        None => format!("{image_name}.txt"),
    }
}
