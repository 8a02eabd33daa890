//! Parquet persistence for pipeline artifacts.
//!
//! The stratification table is the one checkpoint the pipeline can resume
//! from; the pivot and the sample are hand-off artifacts. Tier labels
//! persist as nullable strings so unclassified rows survive the round trip.

use crate::algorithm::stratify::table_languages;
use crate::error::{Result, StudyError};
use crate::models::{
    CellCount, ContextTier, DepthTier, LengthBucket, SampleRow, SctId, SimilarityTier, StratumRow,
};
use crate::utils::parquet::{read_rows, write_rows};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Flat persisted form of a [`StratumRow`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CheckpointRow {
    sctid: SctId,
    language: String,
    fsn: String,
    hierarchy: String,
    depth_tier: Option<String>,
    context_tier: Option<String>,
    similarity_tier: Option<String>,
    length_bucket: Option<String>,
    reference_translations: Option<Vec<String>>,
    has_translation: bool,
}

impl From<&StratumRow> for CheckpointRow {
    fn from(row: &StratumRow) -> Self {
        Self {
            sctid: row.sctid,
            language: row.language.clone(),
            fsn: row.fsn.clone(),
            hierarchy: row.hierarchy.clone(),
            depth_tier: row.depth_tier.map(|t| t.as_str().to_string()),
            context_tier: row.context_tier.map(|t| t.as_str().to_string()),
            similarity_tier: row.similarity_tier.map(|t| t.as_str().to_string()),
            length_bucket: row.length_bucket.map(|t| t.as_str().to_string()),
            reference_translations: row.reference_translations.clone(),
            has_translation: row.has_translation,
        }
    }
}

fn parse_label<T>(
    label: Option<String>,
    parse: impl Fn(&str) -> Option<T>,
    axis: &str,
) -> Result<Option<T>> {
    match label {
        None => Ok(None),
        Some(label) => parse(&label).map(Some).ok_or_else(|| {
            StudyError::Validation(format!("unknown {axis} label '{label}' in checkpoint"))
        }),
    }
}

impl CheckpointRow {
    fn into_stratum(self) -> Result<StratumRow> {
        Ok(StratumRow {
            sctid: self.sctid,
            language: self.language,
            fsn: self.fsn,
            hierarchy: self.hierarchy,
            depth_tier: parse_label(self.depth_tier, DepthTier::from_label, "depth tier")?,
            context_tier: parse_label(self.context_tier, ContextTier::from_label, "context tier")?,
            similarity_tier: parse_label(
                self.similarity_tier,
                SimilarityTier::from_label,
                "similarity tier",
            )?,
            length_bucket: parse_label(self.length_bucket, LengthBucket::from_label, "length bucket")?,
            reference_translations: self.reference_translations,
            has_translation: self.has_translation,
        })
    }
}

/// Persist the stratification table
pub fn write_stratification(path: &Path, rows: &[StratumRow]) -> Result<()> {
    let persisted: Vec<CheckpointRow> = rows.iter().map(CheckpointRow::from).collect();
    write_rows(path, &persisted)?;
    info!("Wrote stratification checkpoint: {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Restore the stratification table from a checkpoint
pub fn read_stratification(path: &Path) -> Result<Vec<StratumRow>> {
    let persisted: Vec<CheckpointRow> = read_rows(path)?;
    let rows: Vec<StratumRow> = persisted
        .into_iter()
        .map(CheckpointRow::into_stratum)
        .collect::<Result<_>>()?;
    info!(
        "Read stratification checkpoint: {} rows, languages {:?} from {}",
        rows.len(),
        table_languages(&rows),
        path.display()
    );
    Ok(rows)
}

/// Persist the cell-size pivot
pub fn write_cell_counts(path: &Path, counts: &[CellCount]) -> Result<()> {
    write_rows(path, counts)?;
    info!("Wrote cell-size summary: {} cells to {}", counts.len(), path.display());
    Ok(())
}

/// Persist the final sample
pub fn write_samples(path: &Path, samples: &[SampleRow]) -> Result<()> {
    write_rows(path, samples)?;
    info!("Wrote sample: {} rows to {}", samples.len(), path.display());
    Ok(())
}
