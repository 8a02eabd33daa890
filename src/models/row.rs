//! Stratification table rows, cell keys and sample rows.

use super::concept::SctId;
use super::tiers::{ContextTier, DepthTier, LengthBucket, SimilarityTier};
use serde::{Deserialize, Serialize};

/// One stratification row per (concept, language) pair.
///
/// Missing tier lookups stay `None`; such rows survive in the checkpoint
/// table but are excluded from sampling eligibility.
#[derive(Debug, Clone, PartialEq)]
pub struct StratumRow {
    pub sctid: SctId,
    pub language: String,
    pub fsn: String,
    pub hierarchy: String,
    pub depth_tier: Option<DepthTier>,
    pub context_tier: Option<ContextTier>,
    pub similarity_tier: Option<SimilarityTier>,
    pub length_bucket: Option<LengthBucket>,
    pub reference_translations: Option<Vec<String>>,
    pub has_translation: bool,
}

impl StratumRow {
    /// Full stratification key, present only when the row is classified on
    /// every axis and carries a hierarchy label
    #[must_use]
    pub fn cell_key(&self) -> Option<CellKey> {
        if self.hierarchy.is_empty() {
            return None;
        }
        Some(CellKey {
            hierarchy: self.hierarchy.clone(),
            depth_tier: self.depth_tier?,
            language: self.language.clone(),
            context_tier: self.context_tier?,
            similarity_tier: self.similarity_tier?,
            length_bucket: self.length_bucket?,
        })
    }
}

/// The six-key stratification cell
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    pub hierarchy: String,
    pub depth_tier: DepthTier,
    pub language: String,
    pub context_tier: ContextTier,
    pub similarity_tier: SimilarityTier,
    pub length_bucket: LengthBucket,
}

/// One entry of the cell-size summary pivot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCount {
    pub hierarchy: String,
    pub language: String,
    pub depth_tier: String,
    pub context_tier: String,
    pub similarity_tier: String,
    pub length_bucket: String,
    pub has_translation: bool,
    pub count: u64,
}

/// One selected row of the final sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRow {
    pub sctid: SctId,
    pub language: String,
    pub fsn: String,
    pub reference_translations: Vec<String>,
}
