//! Coverage loading from per-language Parquet files.

use crate::coverage::TranslationCoverage;
use crate::error::Result;
use crate::models::SctId;
use crate::utils::parquet::read_rows;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One accepted translation row: a concept and one synonym
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CoverageRecord {
    sctid: SctId,
    term: String,
}

/// Load the coverage set for one language from a (`sctid`, `term`) table
pub fn load_coverage(language: &str, path: &Path) -> Result<TranslationCoverage> {
    let records: Vec<CoverageRecord> = read_rows(path)?;
    let coverage = TranslationCoverage::from_entries(
        language,
        records.into_iter().map(|r| (r.sctid, r.term)),
    );
    info!(
        "Loaded coverage for '{}': {} translated concepts from {}",
        language,
        coverage.len(),
        path.display()
    );
    Ok(coverage)
}
