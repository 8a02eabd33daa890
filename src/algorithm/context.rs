//! Context tier classification from translation coverage of parents and
//! relationship targets.

use crate::coverage::TranslationCoverage;
use crate::graph::OntologyGraph;
use crate::models::{ContextTier, SctId};
use log::info;
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::time::Instant;

/// Assign a context tier to every concept for one language.
///
/// Tier 1 candidates are concepts whose parents are all covered (vacuously
/// true for parentless concepts). Tier 2 is the subset of candidates with at
/// least one relationship group whose targets are all covered; a concept
/// with no groups never reaches Tier 2. The returned map covers the full
/// concept universe, so the three tiers partition it.
pub fn classify_context<G: OntologyGraph>(
    graph: &G,
    coverage: &TranslationCoverage,
) -> FxHashMap<SctId, ContextTier> {
    let start = Instant::now();
    let mut tiers = FxHashMap::with_capacity_and_hasher(graph.len(), FxBuildHasher);
    let mut tier1 = 0usize;
    let mut tier2 = 0usize;

    for &sctid in graph.concept_ids() {
        let Some(concept) = graph.concept(sctid) else {
            continue;
        };
        let parents_covered = concept.parents.iter().all(|&p| coverage.contains(p));
        let tier = if parents_covered {
            let attributes_covered = !concept.relationship_groups.is_empty()
                && concept.relationship_targets().all(|t| coverage.contains(t));
            if attributes_covered {
                tier2 += 1;
                ContextTier::Tier2
            } else {
                tier1 += 1;
                ContextTier::Tier1
            }
        } else {
            ContextTier::Tier0
        };
        tiers.insert(sctid, tier);
    }

    info!(
        "Context tiers for '{}': {} tier-2, {} tier-1, {} tier-0 in {:.2?}",
        coverage.language(),
        tier2,
        tier1,
        tiers.len() - tier1 - tier2,
        start.elapsed()
    );
    tiers
}
