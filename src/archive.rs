//! Archive assembly: the batch result serialized into a single ZIP.
//!
//! Per entry, two files sharing a stem:
//!
//! ```text
//! influencer_0001.jpg    # processed image
//! influencer_0001.txt    # composed caption + one trailing newline
//! ```
//!
//! plus one `captions.csv` summarizing the whole batch in processing order
//! (`dst_name,caption` header, quoted fields where needed). Deflate
//! compression throughout. Logical content is deterministic for identical
//! inputs; archive bytes are not guaranteed to be (timestamps).

use crate::pipeline::BatchResult;
use std::io::{Cursor, Write};
use thiserror::Error;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// Name of the aggregate summary file inside the archive.
pub const SUMMARY_NAME: &str = "captions.csv";

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("archive write failed: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize the batch into ZIP bytes.
///
/// This is the run's sole deliverable, so unlike per-item failures an error
/// here is surfaced to the caller and aborts the run.
pub fn package(batch: &BatchResult) -> Result<Vec<u8>, ArchiveError> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut csv = String::from("dst_name,caption\n");

    for entry in &batch.entries {
        writer.start_file(entry.image_name(), options)?;
        writer.write_all(&entry.jpeg)?;

        writer.start_file(entry.text_name(), options)?;
        writer.write_all(entry.caption.as_bytes())?;
        writer.write_all(b"\n")?;

        csv.push_str(&csv_field(&entry.image_name()));
        csv.push(',');
        csv.push_str(&csv_field(&entry.caption));
        csv.push('\n');
    }

    writer.start_file(SUMMARY_NAME, options)?;
    writer.write_all(csv.as_bytes())?;

    Ok(writer.finish()?.into_inner())
}

/// Quote a CSV field when it contains a delimiter, quote, or line break;
/// embedded quotes are doubled.
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
