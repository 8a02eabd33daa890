//! Depth classification from the shortest IS-A path to the ontology root.

use crate::graph::OntologyGraph;
use crate::models::{DepthTier, SctId};
use crate::utils::progress;
use log::{info, warn};
use rustc_hash::FxHashMap;
use std::time::Instant;

/// Assign a depth tier to every concept with an IS-A path to the root.
///
/// Disconnected concepts, and the root itself at distance zero, are left out
/// of the returned map and stay unclassified downstream.
pub fn classify_depth<G: OntologyGraph>(graph: &G) -> FxHashMap<SctId, DepthTier> {
    let start = Instant::now();
    let pb = progress::create_scan_progress_bar(graph.len() as u64, Some("Classifying depth"));

    let mut tiers =
        FxHashMap::with_capacity_and_hasher(graph.len(), rustc_hash::FxBuildHasher);
    let mut unreachable = 0usize;
    for &sctid in graph.concept_ids() {
        match graph.path_to_root(sctid) {
            Some(path) => {
                let edges = path.len().saturating_sub(1);
                if let Some(tier) = DepthTier::from_path_len(edges) {
                    tiers.insert(sctid, tier);
                }
            }
            None => unreachable += 1,
        }
        pb.inc(1);
    }
    progress::finish_progress_bar(&pb, Some("Depth classification complete"));

    if unreachable > 0 {
        warn!("{unreachable} concepts have no IS-A path to the root and stay unclassified");
    }
    info!(
        "Classified depth for {} of {} concepts in {:.2?}",
        tiers.len(),
        graph.len(),
        start.elapsed()
    );
    tiers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::InMemoryGraph;
    use crate::models::Concept;
    use crate::utils::fixtures::concept;

    /// A chain root <- c1 <- c2 <- ... <- c9, plus one orphan
    fn chain_graph() -> InMemoryGraph {
        let mut concepts: Vec<Concept> = vec![concept(100, "Root (root)", &[])];
        for step in 1..=9 {
            let parent = if step == 1 { 100 } else { 100 + step - 1 };
            concepts.push(concept(100 + step, &format!("Level {step} (disorder)"), &[parent]));
        }
        concepts.push(concept(999, "Orphan (disorder)", &[]));
        InMemoryGraph::with_root(concepts, 100)
    }

    #[test]
    fn test_depth_tiers_along_a_chain() {
        let graph = chain_graph();
        let tiers = classify_depth(&graph);

        // Root is at distance zero and stays unclassified
        assert!(!tiers.contains_key(&100));
        assert_eq!(tiers.get(&101), Some(&DepthTier::Shallow));
        assert_eq!(tiers.get(&104), Some(&DepthTier::Shallow));
        assert_eq!(tiers.get(&105), Some(&DepthTier::Medium));
        assert_eq!(tiers.get(&107), Some(&DepthTier::Medium));
        assert_eq!(tiers.get(&108), Some(&DepthTier::Deep));
        assert_eq!(tiers.get(&109), Some(&DepthTier::Deep));
    }

    #[test]
    fn test_disconnected_concept_stays_unclassified() {
        let graph = chain_graph();
        let tiers = classify_depth(&graph);
        assert!(!tiers.contains_key(&999));
        // Everything else is classified
        assert_eq!(tiers.len(), 9);
    }

    #[test]
    fn test_multi_parent_concept_uses_shortest_path() {
        // d has one parent deep in the chain and one directly under the root
        let graph = InMemoryGraph::with_root(
            vec![
                concept(1, "Root (root)", &[]),
                concept(2, "Shallow branch (disorder)", &[1]),
                concept(3, "L1 (disorder)", &[1]),
                concept(4, "L2 (disorder)", &[3]),
                concept(5, "L3 (disorder)", &[4]),
                concept(6, "L4 (disorder)", &[5]),
                concept(7, "L5 (disorder)", &[6]),
                concept(8, "D (disorder)", &[7, 2]),
            ],
            1,
        );
        let tiers = classify_depth(&graph);
        // Via the shallow branch the distance is 2, not 6
        assert_eq!(tiers.get(&8), Some(&DepthTier::Shallow));
    }
}
