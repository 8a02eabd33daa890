//! Lexical similarity index over concept names.
//!
//! Finds, for each concept, the distinct concepts whose names share enough
//! n-gram vocabulary to be contextually informative, excluding anything
//! hierarchically related (that closeness is the context tier's business).
//! Per language, a concept lands in similarity Tier 1 when at least one of
//! its filtered neighbors is already translated.

pub mod ngram;
pub mod search;

pub use ngram::TermMatrix;
pub use search::{filter_hierarchical, find_candidate_pairs};

use crate::config::StudyConfig;
use crate::coverage::TranslationCoverage;
use crate::error::{Result, StudyError};
use crate::graph::OntologyGraph;
use crate::models::{SctId, SimilarityTier};
use log::info;
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::time::Instant;

const NO_NEIGHBORS: &[SctId] = &[];

/// Filtered lexical-neighbor adjacency over the concept universe
#[derive(Debug, Clone)]
pub struct LexicalIndex {
    neighbors: FxHashMap<SctId, Vec<SctId>>,
}

impl LexicalIndex {
    /// Featurize every name, run the chunked candidate search and filter
    /// hierarchically related pairs.
    pub fn build<G: OntologyGraph>(graph: &G, config: &StudyConfig) -> Result<Self> {
        if config.chunk_size == 0 {
            return Err(StudyError::Config("chunk size must be at least 1".to_string()));
        }
        if config.ngram_min == 0 || config.ngram_min > config.ngram_max {
            return Err(StudyError::Config(format!(
                "invalid n-gram range {}..={}",
                config.ngram_min, config.ngram_max
            )));
        }
        if config.similarity_threshold == 0 {
            return Err(StudyError::Config(
                "similarity threshold must be at least 1".to_string(),
            ));
        }

        let start = Instant::now();
        let matrix = TermMatrix::build(graph, config.ngram_min, config.ngram_max);
        info!(
            "Built n-gram matrix: {} terms, {} distinct n-grams",
            matrix.num_rows(),
            matrix.num_features()
        );

        let pairs = find_candidate_pairs(
            &matrix,
            config.chunk_size,
            config.similarity_threshold,
            config.use_parallel,
        );
        info!("Raw candidate pairs at threshold {}: {}", config.similarity_threshold, pairs.len());

        let neighbors = filter_hierarchical(graph, &matrix, &pairs);
        info!(
            "Lexical index: {} concepts with neighbors in {:.2?}",
            neighbors.len(),
            start.elapsed()
        );
        Ok(Self { neighbors })
    }

    /// Filtered lexical neighbors of a concept, ascending; empty when none
    #[must_use]
    pub fn neighbors(&self, sctid: SctId) -> &[SctId] {
        self.neighbors.get(&sctid).map_or(NO_NEIGHBORS, Vec::as_slice)
    }

    /// Assign a similarity tier to every concept for one language.
    ///
    /// The returned map covers the full universe: Tier 1 where some filtered
    /// neighbor is covered, Tier 0 everywhere else, so the two tiers
    /// partition it. A concept with no neighbors is always Tier 0.
    #[must_use]
    pub fn classify_similarity<G: OntologyGraph>(
        &self,
        graph: &G,
        coverage: &TranslationCoverage,
    ) -> FxHashMap<SctId, SimilarityTier> {
        let mut tiers = FxHashMap::with_capacity_and_hasher(graph.len(), FxBuildHasher);
        let mut tier1 = 0usize;
        for &sctid in graph.concept_ids() {
            let tier = if self.neighbors(sctid).iter().any(|&n| coverage.contains(n)) {
                tier1 += 1;
                SimilarityTier::Tier1
            } else {
                SimilarityTier::Tier0
            };
            tiers.insert(sctid, tier);
        }
        info!(
            "Similarity tiers for '{}': {} tier-1, {} tier-0",
            coverage.language(),
            tier1,
            tiers.len() - tier1
        );
        tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::InMemoryGraph;
    use crate::utils::fixtures::{concept, coverage};

    fn graph() -> InMemoryGraph {
        InMemoryGraph::with_root(
            vec![
                concept(1, "Clinical finding (finding)", &[]),
                concept(2, "Pneumonia (disorder)", &[1]),
                concept(3, "Viral pneumonia (disorder)", &[2]),
                concept(4, "Bacterial pneumonia (disorder)", &[2]),
                concept(5, "Wheeze (finding)", &[1]),
            ],
            1,
        )
    }

    fn config() -> StudyConfig {
        StudyConfig::builder()
            .languages(["da"])
            .hierarchies(["disorder"])
            .build()
    }

    #[test]
    fn test_untranslated_cousin_of_translated_concept_is_tier1() {
        let graph = graph();
        let index = LexicalIndex::build(&graph, &config()).unwrap();

        // "Viral pneumonia" is translated; "Bacterial pneumonia" is not, but
        // they are lexical cousins with no hierarchical relation.
        let tiers = index.classify_similarity(&graph, &coverage("da", &[3]));
        assert_eq!(tiers.get(&4), Some(&SimilarityTier::Tier1));
        // Their shared ancestor gains nothing: its only lexical relatives
        // were filtered as descendants.
        assert_eq!(tiers.get(&2), Some(&SimilarityTier::Tier0));
    }

    #[test]
    fn test_concept_without_neighbors_is_tier0() {
        let graph = graph();
        let index = LexicalIndex::build(&graph, &config()).unwrap();
        // "Wheeze" shares no meaningful vocabulary with the other names,
        // so full coverage elsewhere cannot lift it out of Tier 0.
        assert!(index.neighbors(5).is_empty());
        let tiers = index.classify_similarity(&graph, &coverage("da", &[1, 2, 3, 4, 5]));
        assert_eq!(tiers.get(&5), Some(&SimilarityTier::Tier0));
    }

    #[test]
    fn test_similarity_tiers_partition_the_universe() {
        let graph = graph();
        let index = LexicalIndex::build(&graph, &config()).unwrap();
        let tiers = index.classify_similarity(&graph, &coverage("da", &[3]));
        assert_eq!(tiers.len(), graph.len());
    }

    #[test]
    fn test_build_rejects_degenerate_settings() {
        let graph = graph();
        let mut bad = config();
        bad.chunk_size = 0;
        assert!(LexicalIndex::build(&graph, &bad).is_err());

        let mut bad = config();
        bad.similarity_threshold = 0;
        assert!(LexicalIndex::build(&graph, &bad).is_err());

        let mut bad = config();
        bad.ngram_min = 12;
        assert!(LexicalIndex::build(&graph, &bad).is_err());
    }
}
