//! Batch pipeline: inputs → captioned, cropped, numbered dataset entries.
//!
//! Single sequential pass over the input collection, 1-based and
//! order-preserving. Per item:
//!
//! 1. Decode (EXIF orientation applied). A file that does not decode is
//!    skipped with a warning — the batch continues, and the item's sequence
//!    number is left as a gap.
//! 2. Center-crop to the configured ratio, resize to the exact configured
//!    dimensions.
//! 3. Request the caption exactly once, from the *original* bytes; any
//!    captioning failure resolves to the empty caption.
//! 4. Compose the caption template, name the entry by its input position,
//!    encode JPEG at the fixed quality.
//!
//! The pipeline has no side effects beyond warning lines on stdout; the
//! in-memory [`BatchResult`] is the only output.

use crate::caption;
use crate::captioner::{CaptionError, CaptionProvider};
use crate::config::RunConfig;
use crate::imaging;
use crate::naming;
use crate::scan::InputImage;

/// One finished dataset entry. The stem is shared by the image file, the
/// caption sidecar, and the summary row.
#[derive(Debug, Clone)]
pub struct DatasetEntry {
    /// Destination base name, e.g. `influencer_0003`.
    pub stem: String,
    /// Encoded JPEG bytes at the final dimensions.
    pub jpeg: Vec<u8>,
    /// Composed caption text. May be empty, never absent.
    pub caption: String,
    /// Original file name, kept for diagnostics.
    pub source_name: String,
}

impl DatasetEntry {
    pub fn image_name(&self) -> String {
        format!("{}.jpg", self.stem)
    }

    pub fn text_name(&self) -> String {
        naming::text_name_for(&self.image_name())
    }
}

/// Ordered pipeline output: entries in input order, plus the names of inputs
/// skipped for decode failures.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub entries: Vec<DatasetEntry>,
    pub skipped: Vec<String>,
}

/// Process the batch. Infallible by design: decode failures skip the item,
/// captioning failures resolve to empty captions, and only the caller's
/// archive write can abort the run.
pub fn run(
    inputs: &[InputImage],
    provider: &impl CaptionProvider,
    config: &RunConfig,
) -> BatchResult {
    let ratio = config.ratio();
    if config.api_token.is_empty() {
        println!("No api_token configured - captions will be empty");
    }

    let mut result = BatchResult::default();

    for (position, input) in inputs.iter().enumerate() {
        // Sequence numbers follow input position, so skips leave gaps
        let index = position + 1;

        let decoded = match imaging::decode_oriented(&input.bytes) {
            Ok(img) => img,
            Err(err) => {
                println!("  skipping {}: {err}", input.source_name);
                result.skipped.push(input.source_name.clone());
                continue;
            }
        };

        let cropped = imaging::center_crop_to_ratio(decoded, ratio.value());
        let resized = imaging::resize_exact(&cropped, config.width, config.height);

        // Caption from the original bytes, exactly once per run
        let raw_caption = match provider.caption(&input.bytes) {
            Ok(text) => text,
            Err(CaptionError::MissingToken) => String::new(),
            Err(err) => {
                println!("  caption unavailable for {}: {err}", input.source_name);
                String::new()
            }
        };
        let composed = caption::compose(&config.template, &raw_caption, &config.trigger);

        let jpeg = match imaging::encode_jpeg(&resized) {
            Ok(bytes) => bytes,
            Err(err) => {
                println!("  skipping {}: {err}", input.source_name);
                result.skipped.push(input.source_name.clone());
                continue;
            }
        };

        result.entries.push(DatasetEntry {
            stem: naming::stem_for(&config.prefix, index),
            jpeg,
            caption: composed,
            source_name: input.source_name.clone(),
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captioner::tests::StubCaptioner;
    use image::RgbImage;

    fn test_jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        imaging::encode_jpeg(&img).unwrap()
    }

    fn input(name: &str, bytes: Vec<u8>) -> InputImage {
        InputImage {
            source_name: name.to_string(),
            bytes,
        }
    }

    fn small_config() -> RunConfig {
        RunConfig {
            width: 128,
            height: 192,
            prefix: "p".to_string(),
            trigger: "sks".to_string(),
            ..RunConfig::default()
        }
    }

    #[test]
    fn entries_follow_input_order_with_sequential_names() {
        let inputs = vec![
            input("one.jpg", test_jpeg(300, 300)),
            input("two.jpg", test_jpeg(400, 200)),
            input("three.jpg", test_jpeg(200, 400)),
        ];
        let provider = StubCaptioner::with(vec![
            Ok("first".into()),
            Ok("second".into()),
            Ok("third".into()),
        ]);

        let result = run(&inputs, &provider, &small_config());

        assert!(result.skipped.is_empty());
        let stems: Vec<&str> = result.entries.iter().map(|e| e.stem.as_str()).collect();
        assert_eq!(stems, vec!["p_0001", "p_0002", "p_0003"]);
        let sources: Vec<&str> = result
            .entries
            .iter()
            .map(|e| e.source_name.as_str())
            .collect();
        assert_eq!(sources, vec!["one.jpg", "two.jpg", "three.jpg"]);
    }

    #[test]
    fn outputs_have_exact_configured_dimensions() {
        let inputs = vec![input("a.jpg", test_jpeg(1000, 1000))];
        let provider = StubCaptioner::with(vec![Ok("x".into())]);

        let result = run(&inputs, &provider, &small_config());

        let decoded = imaging::decode_oriented(&result.entries[0].jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (128, 192));
    }

    #[test]
    fn undecodable_input_is_skipped_leaving_a_gap() {
        let inputs = vec![
            input("good.jpg", test_jpeg(300, 300)),
            input("broken.jpg", b"definitely not a jpeg".to_vec()),
            input("also-good.jpg", test_jpeg(300, 300)),
        ];
        let provider = StubCaptioner::with(vec![Ok("a".into()), Ok("b".into())]);

        let result = run(&inputs, &provider, &small_config());

        assert_eq!(result.skipped, vec!["broken.jpg".to_string()]);
        let stems: Vec<&str> = result.entries.iter().map(|e| e.stem.as_str()).collect();
        // Index 2 is the broken input; its number is not reused
        assert_eq!(stems, vec!["p_0001", "p_0003"]);
    }

    #[test]
    fn caption_failure_resolves_to_empty_caption() {
        let inputs = vec![input("a.jpg", test_jpeg(200, 200))];
        let provider = StubCaptioner::with(vec![Err(CaptionError::Status(503))]);

        let result = run(&inputs, &provider, &small_config());

        assert_eq!(result.entries.len(), 1);
        // Template resolves with an empty caption slot
        assert_eq!(result.entries[0].caption, "a photo of sks,");
    }

    #[test]
    fn missing_token_yields_empty_captions_without_aborting() {
        let inputs = vec![
            input("a.jpg", test_jpeg(200, 200)),
            input("b.jpg", test_jpeg(200, 200)),
        ];
        let provider = StubCaptioner::with(vec![
            Err(CaptionError::MissingToken),
            Err(CaptionError::MissingToken),
        ]);

        let result = run(&inputs, &provider, &small_config());

        assert_eq!(result.entries.len(), 2);
        for entry in &result.entries {
            assert_eq!(entry.caption, "a photo of sks,");
        }
    }

    #[test]
    fn caption_requested_exactly_once_per_input() {
        let inputs = vec![
            input("a.jpg", test_jpeg(200, 200)),
            input("b.jpg", test_jpeg(200, 200)),
        ];
        let provider = StubCaptioner::with(vec![Ok("one".into()), Ok("two".into())]);

        run(&inputs, &provider, &small_config());

        assert_eq!(provider.call_count(), 2);
    }

    #[test]
    fn skipped_input_still_consumes_no_caption_call() {
        let inputs = vec![input("broken.jpg", b"garbage".to_vec())];
        let provider = StubCaptioner::with(vec![Ok("never used".into())]);

        let result = run(&inputs, &provider, &small_config());

        assert!(result.entries.is_empty());
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn unparseable_ratio_falls_back_without_aborting() {
        let inputs = vec![input("a.jpg", test_jpeg(1000, 1000))];
        let provider = StubCaptioner::with(vec![Ok("x".into())]);
        let config = RunConfig {
            aspect_ratio: "abc".to_string(),
            ..small_config()
        };

        let result = run(&inputs, &provider, &config);

        // Falls back to 2:3 and still produces the entry
        assert_eq!(result.entries.len(), 1);
        let decoded = imaging::decode_oriented(&result.entries[0].jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (128, 192));
    }

    #[test]
    fn entry_names_pair_image_and_text() {
        let entry = DatasetEntry {
            stem: "p_0004".into(),
            jpeg: Vec::new(),
            caption: String::new(),
            source_name: "x.jpg".into(),
        };
        assert_eq!(entry.image_name(), "p_0004.jpg");
        assert_eq!(entry.text_name(), "p_0004.txt");
    }

    #[test]
    fn empty_batch_yields_empty_result() {
        let provider = StubCaptioner::with(vec![]);
        let result = run(&[], &provider, &small_config());
        assert!(result.entries.is_empty());
        assert!(result.skipped.is_empty());
    }
}
