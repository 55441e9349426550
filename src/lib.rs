//! # lora-prep
//!
//! A batch captioning and cropping tool for LoRA training-image datasets.
//! Point it at a directory of photographs and it produces a single ZIP
//! archive of sequence-numbered training pairs: each image captioned by a
//! remote vision model, merged into your caption template, center-cropped to
//! a fixed aspect ratio, and resized to exact training dimensions.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      photos/   →  ordered input batch (sorted by path)
//! 2. Process   batch     →  DatasetEntry per input (crop, resize, caption)
//! 3. Package   entries   →  dataset.zip (jpg + txt pairs + captions.csv)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Collects input images from the source directory in deterministic order |
//! | [`imaging`] | Geometry: crop-box math, orientation, center-crop, exact resize, JPEG encode |
//! | [`captioner`] | `CaptionProvider` trait + HTTP adapter for the remote captioning service |
//! | [`caption`] | Caption template composition (`{caption}` / `{trigger}` placeholders) |
//! | [`naming`] | `{prefix}_{NNNN}` sequential destination names |
//! | [`pipeline`] | Orchestrates one pass over the batch into a `BatchResult` |
//! | [`archive`] | ZIP assembly: image + text pairs plus the `captions.csv` summary |
//! | [`config`] | `config.toml` loading, validation, aspect-ratio parsing |
//! | [`output`] | CLI output formatting — pure `format_*` functions plus print wrappers |
//!
//! # Design Decisions
//!
//! ## Numbering Follows Input Position
//!
//! Destination names use the 1-based position in the sorted input list, so an
//! input that fails to decode leaves a gap rather than renumbering everything
//! after it. Output names stay stable for a given source directory no matter
//! which items fail, which keeps reruns diffable.
//!
//! ## Captioning Failures Never Abort
//!
//! The captioning service is best-effort: any transport, auth, timeout, or
//! response-shape failure resolves to an empty caption for that item, with a
//! warning. The template still composes around the empty slot, so every
//! emitted image has its sidecar. The only fatal error is failing to write
//! the archive itself — it is the sole deliverable.
//!
//! ## Blocking HTTP
//!
//! The batch is sequential and each caption call is a single bounded-timeout
//! request, so the adapter uses reqwest's blocking client rather than
//! dragging in an async runtime.

pub mod archive;
pub mod caption;
pub mod captioner;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod scan;
