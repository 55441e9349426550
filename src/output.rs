//! CLI output formatting.
//!
//! Each report has a `format_*` function returning `Vec<String>` (pure, no
//! I/O, unit testable) and a `print_*` wrapper that writes to stdout.
//!
//! ```text
//! Dataset
//! influencer_0001.jpg
//!     Source: IMG_1021.jpg
//!     Caption: a photo of ohwx person, a woman standing on a beach
//!
//! Skipped
//!     notes-scan.jpg
//!
//! Packaged 12 images (1 skipped)
//! ```

use crate::pipeline::BatchResult;
use crate::scan::InputImage;

/// Captions longer than this are elided in the summary (full text still goes
/// into the archive).
const CAPTION_DISPLAY_LIMIT: usize = 80;

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn truncate_caption(caption: &str) -> String {
    if caption.chars().count() <= CAPTION_DISPLAY_LIMIT {
        return caption.to_string();
    }
    let cut: String = caption.chars().take(CAPTION_DISPLAY_LIMIT).collect();
    format!("{}...", cut.trim_end())
}

/// Format the run summary: one block per entry, skipped inputs, totals.
pub fn format_run_output(batch: &BatchResult) -> Vec<String> {
    let mut lines = vec!["Dataset".to_string()];

    for entry in &batch.entries {
        lines.push(entry.image_name());
        lines.push(format!("{}Source: {}", indent(1), entry.source_name));
        if entry.caption.is_empty() {
            lines.push(format!("{}Caption: (empty)", indent(1)));
        } else {
            lines.push(format!(
                "{}Caption: {}",
                indent(1),
                truncate_caption(&entry.caption)
            ));
        }
    }

    if !batch.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for name in &batch.skipped {
            lines.push(format!("{}{}", indent(1), name));
        }
    }

    lines.push(String::new());
    let skipped_note = if batch.skipped.is_empty() {
        String::new()
    } else {
        format!(" ({} skipped)", batch.skipped.len())
    };
    lines.push(format!(
        "Packaged {} images{skipped_note}",
        batch.entries.len()
    ));
    lines
}

pub fn print_run_output(batch: &BatchResult) {
    for line in format_run_output(batch) {
        println!("{line}");
    }
}

/// Format the check report: what a run would take as input.
pub fn format_check_output(inputs: &[InputImage]) -> Vec<String> {
    let mut lines = vec!["Inputs".to_string()];
    for (position, input) in inputs.iter().enumerate() {
        lines.push(format!(
            "{}{:04} {}",
            indent(1),
            position + 1,
            input.source_name
        ));
    }
    lines.push(String::new());
    lines.push(format!("{} images found", inputs.len()));
    lines
}

pub fn print_check_output(inputs: &[InputImage]) {
    for line in format_check_output(inputs) {
        println!("{line}");
    }
}
