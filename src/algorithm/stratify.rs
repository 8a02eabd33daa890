//! Stratification table construction and cell-size summaries.
//!
//! The table builder is a pure join: it looks up the previously computed
//! tier maps and the coverage synonyms for every (concept, language) pair
//! and never computes a label of its own. Missing lookups become `None`
//! rather than failures.

use crate::coverage::TranslationCoverage;
use crate::graph::OntologyGraph;
use crate::models::{
    CellCount, ContextTier, DepthTier, LengthBucket, SctId, SimilarityTier, StratumRow,
};
use itertools::Itertools;
use log::info;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::time::Instant;

/// Label rendered for rows missing a tier assignment
pub const UNCLASSIFIED_LABEL: &str = "unclassified";

/// Every per-concept tier map the table join consumes
#[derive(Debug, Clone, Default)]
pub struct TierAssignments {
    /// Language-independent depth tiers
    pub depth: FxHashMap<SctId, DepthTier>,
    /// Language-independent length buckets
    pub length: FxHashMap<SctId, LengthBucket>,
    /// Context tiers keyed by language
    pub context: FxHashMap<String, FxHashMap<SctId, ContextTier>>,
    /// Similarity tiers keyed by language
    pub similarity: FxHashMap<String, FxHashMap<SctId, SimilarityTier>>,
}

/// Join tiers and coverage into one row per (concept, language) pair.
///
/// Rows are ordered by ascending concept id, then by the given coverage
/// order, so identical inputs rebuild an identical table.
#[must_use]
pub fn build_stratification_table<G: OntologyGraph>(
    graph: &G,
    coverages: &[&TranslationCoverage],
    tiers: &TierAssignments,
) -> Vec<StratumRow> {
    let start = Instant::now();
    let mut rows = Vec::with_capacity(graph.len() * coverages.len());

    for &sctid in graph.concept_ids() {
        let Some(concept) = graph.concept(sctid) else {
            continue;
        };
        for coverage in coverages {
            let language = coverage.language();
            let reference_translations = coverage.translations(sctid).map(<[String]>::to_vec);
            let has_translation = reference_translations
                .as_ref()
                .is_some_and(|t| !t.is_empty());
            rows.push(StratumRow {
                sctid,
                language: language.to_string(),
                fsn: concept.fsn.clone(),
                hierarchy: concept.hierarchy().to_string(),
                depth_tier: tiers.depth.get(&sctid).copied(),
                context_tier: tiers
                    .context
                    .get(language)
                    .and_then(|m| m.get(&sctid))
                    .copied(),
                similarity_tier: tiers
                    .similarity
                    .get(language)
                    .and_then(|m| m.get(&sctid))
                    .copied(),
                length_bucket: tiers.length.get(&sctid).copied(),
                reference_translations,
                has_translation,
            });
        }
    }

    info!(
        "Built stratification table: {} rows ({} concepts x {} languages) in {:.2?}",
        rows.len(),
        graph.len(),
        coverages.len(),
        start.elapsed()
    );
    rows
}

/// Count rows per full stratification cell, including translation presence.
///
/// Unclassified labels are rendered as [`UNCLASSIFIED_LABEL`]; output is
/// deterministically ordered. Purely derived, nothing downstream consumes it.
#[must_use]
pub fn cell_size_summary(rows: &[StratumRow]) -> Vec<CellCount> {
    let mut counts: BTreeMap<(String, String, String, String, String, String, bool), u64> =
        BTreeMap::new();
    for row in rows {
        let key = (
            row.hierarchy.clone(),
            row.language.clone(),
            row.depth_tier.map_or(UNCLASSIFIED_LABEL, DepthTier::as_str).to_string(),
            row.context_tier.map_or(UNCLASSIFIED_LABEL, ContextTier::as_str).to_string(),
            row.similarity_tier
                .map_or(UNCLASSIFIED_LABEL, SimilarityTier::as_str)
                .to_string(),
            row.length_bucket
                .map_or(UNCLASSIFIED_LABEL, LengthBucket::as_str)
                .to_string(),
            row.has_translation,
        );
        *counts.entry(key).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(
            |((hierarchy, language, depth, context, similarity, length, has_translation), count)| {
                CellCount {
                    hierarchy,
                    language,
                    depth_tier: depth,
                    context_tier: context,
                    similarity_tier: similarity,
                    length_bucket: length,
                    has_translation,
                    count,
                }
            },
        )
        .collect()
}

/// Distinct languages present in a table, in first-seen order
#[must_use]
pub fn table_languages(rows: &[StratumRow]) -> Vec<String> {
    rows.iter().map(|r| r.language.clone()).unique().collect()
}
