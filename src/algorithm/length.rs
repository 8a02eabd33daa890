//! Length bucketing of tag-stripped canonical names.

use crate::graph::OntologyGraph;
use crate::models::{LengthBucket, SctId};
use rustc_hash::{FxBuildHasher, FxHashMap};

/// Assign a length bucket to every concept from its tag-stripped English
/// canonical name. Language-independent, no failure modes.
pub fn classify_length<G: OntologyGraph>(graph: &G) -> FxHashMap<SctId, LengthBucket> {
    let mut buckets = FxHashMap::with_capacity_and_hasher(graph.len(), FxBuildHasher);
    for &sctid in graph.concept_ids() {
        if let Some(concept) = graph.concept(sctid) {
            buckets.insert(sctid, LengthBucket::from_term(concept.bare_term()));
        }
    }
    buckets
}
