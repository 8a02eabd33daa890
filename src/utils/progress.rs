//! Progress reporting for the long-running classification phases,
//! using the indicatif crate.

use indicatif::{ProgressBar, ProgressStyle};

/// Style for a full-universe scan progress bar
pub const SCAN_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({per_sec}) {msg}";

/// Style for the chunked similarity search progress bar
pub const CHUNK_TEMPLATE: &str =
    "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg}";

/// Create a progress bar for a scan over the full concept universe
#[must_use]
pub fn create_scan_progress_bar(length: u64, description: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(length);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(SCAN_TEMPLATE)
            .unwrap()
            .progress_chars("#>-"),
    );
    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }
    pb
}

/// Create a progress bar counting processed similarity chunks
#[must_use]
pub fn create_chunk_progress_bar(chunks: u64, description: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(chunks);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(CHUNK_TEMPLATE)
            .unwrap()
            .progress_chars("#>-"),
    );
    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }
    pb
}

/// Finish a progress bar with an optional completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    if let Some(msg) = message {
        pb.finish_with_message(msg.to_string());
    } else {
        pb.finish();
    }
}
