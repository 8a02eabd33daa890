//! Chunked candidate search over the n-gram term matrix.
//!
//! Scoring the whole universe against itself would materialize a V×V
//! similarity matrix. Instead the rows are processed in fixed-size chunks;
//! each chunk's sparse product against the full matrix is accumulated
//! through the postings lists, and only pairs at or above the score
//! threshold survive. Peak memory is bounded by the chunk, not the
//! universe, and the union of per-chunk results is independent of chunk
//! size, chunk order and parallelism.

use crate::algorithm::similarity::ngram::TermMatrix;
use crate::graph::OntologyGraph;
use crate::models::SctId;
use crate::utils::progress;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::ops::Range;

/// Score one chunk of rows against the full matrix.
///
/// `scores[other]` ends up as the number of distinct n-grams the probe row
/// shares with `other`; the accumulator is reset between rows through the
/// touched list, so a chunk never allocates more than one score buffer.
fn chunk_candidates(matrix: &TermMatrix, rows: Range<usize>, threshold: u32) -> Vec<(u32, u32)> {
    let mut scores = vec![0u32; matrix.num_rows()];
    let mut touched: Vec<u32> = Vec::new();
    let mut pairs = Vec::new();

    for row in rows {
        for &feature in matrix.row_features(row) {
            for &other in matrix.postings(feature) {
                if scores[other as usize] == 0 {
                    touched.push(other);
                }
                scores[other as usize] += 1;
            }
        }
        let probe = row as u32;
        for &other in &touched {
            if other != probe && scores[other as usize] >= threshold {
                pairs.push((probe, other));
            }
            scores[other as usize] = 0;
        }
        touched.clear();
    }
    pairs
}

/// Find all candidate pairs with at least `threshold` shared n-grams.
///
/// Chunks are scored independently; parallel and sequential execution
/// produce the same pair set.
#[must_use]
pub fn find_candidate_pairs(
    matrix: &TermMatrix,
    chunk_size: usize,
    threshold: u32,
    parallel: bool,
) -> Vec<(u32, u32)> {
    let num_rows = matrix.num_rows();
    if num_rows == 0 || chunk_size == 0 {
        return Vec::new();
    }
    let starts: Vec<usize> = (0..num_rows).step_by(chunk_size).collect();
    let pb = progress::create_chunk_progress_bar(starts.len() as u64, Some("Similarity search"));

    let per_chunk: Vec<Vec<(u32, u32)>> = if parallel {
        starts
            .par_iter()
            .progress_with(pb.clone())
            .map(|&start| {
                chunk_candidates(matrix, start..(start + chunk_size).min(num_rows), threshold)
            })
            .collect()
    } else {
        starts
            .iter()
            .map(|&start| {
                let chunk = chunk_candidates(matrix, start..(start + chunk_size).min(num_rows), threshold);
                pb.inc(1);
                chunk
            })
            .collect()
    };
    progress::finish_progress_bar(&pb, Some("Similarity search complete"));

    per_chunk.into_iter().flatten().collect()
}

/// Remove hierarchically related candidate pairs.
///
/// A pair is dropped when either side is an ancestor or descendant of the
/// other: descendant-direction edges are removed against each concept's
/// descendant closure, and only pairs surviving in both directions are
/// kept, which removes the ancestor direction as well since scoring is
/// symmetric.
#[must_use]
pub fn filter_hierarchical<G: OntologyGraph>(
    graph: &G,
    matrix: &TermMatrix,
    pairs: &[(u32, u32)],
) -> FxHashMap<SctId, Vec<SctId>> {
    let mut adjacency: FxHashMap<u32, SmallVec<[u32; 8]>> = FxHashMap::default();
    for &(probe, other) in pairs {
        adjacency.entry(probe).or_default().push(other);
    }

    let mut surviving: FxHashSet<(u32, u32)> = FxHashSet::default();
    for (&probe, neighbors) in &adjacency {
        let descendants = graph.descendants(matrix.id(probe as usize));
        for &other in neighbors {
            if !descendants.contains(&matrix.id(other as usize)) {
                surviving.insert((probe, other));
            }
        }
    }

    let mut neighbors_by_id: FxHashMap<SctId, Vec<SctId>> = FxHashMap::default();
    for &(probe, other) in &surviving {
        if surviving.contains(&(other, probe)) {
            neighbors_by_id
                .entry(matrix.id(probe as usize))
                .or_default()
                .push(matrix.id(other as usize));
        }
    }
    for list in neighbors_by_id.values_mut() {
        list.sort_unstable();
        list.dedup();
    }
    neighbors_by_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::similarity::ngram::TermMatrix;
    use crate::graph::InMemoryGraph;
    use crate::utils::fixtures::concept;

    fn pneumonia_graph() -> InMemoryGraph {
        InMemoryGraph::with_root(
            vec![
                concept(1, "Clinical finding (finding)", &[]),
                concept(2, "Pneumonia (disorder)", &[1]),
                concept(3, "Viral pneumonia (disorder)", &[2]),
                concept(4, "Bacterial pneumonia (disorder)", &[2]),
                concept(5, "Fracture of femur (disorder)", &[1]),
            ],
            1,
        )
    }

    fn pair_set(pairs: &[(u32, u32)]) -> FxHashSet<(u32, u32)> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_candidates_are_symmetric_and_exclude_self() {
        let graph = pneumonia_graph();
        let matrix = TermMatrix::build(&graph, 2, 10);
        let pairs = find_candidate_pairs(&matrix, 1000, 2, false);

        for &(a, b) in &pairs {
            assert_ne!(a, b);
        }
        let set = pair_set(&pairs);
        for &(a, b) in &pairs {
            assert!(set.contains(&(b, a)));
        }
    }

    #[test]
    fn test_output_is_independent_of_chunk_size_and_parallelism() {
        let graph = pneumonia_graph();
        let matrix = TermMatrix::build(&graph, 2, 10);

        let whole = pair_set(&find_candidate_pairs(&matrix, 1000, 2, false));
        let tiny = pair_set(&find_candidate_pairs(&matrix, 1, 2, false));
        let parallel = pair_set(&find_candidate_pairs(&matrix, 2, 2, true));

        assert_eq!(whole, tiny);
        assert_eq!(whole, parallel);
    }

    #[test]
    fn test_hierarchical_pairs_are_filtered() {
        let graph = pneumonia_graph();
        let matrix = TermMatrix::build(&graph, 2, 10);
        let pairs = find_candidate_pairs(&matrix, 1000, 2, false);
        let neighbors = filter_hierarchical(&graph, &matrix, &pairs);

        // The viral/bacterial cousins survive
        assert!(neighbors.get(&3).is_some_and(|n| n.contains(&4)));
        assert!(neighbors.get(&4).is_some_and(|n| n.contains(&3)));

        // "Pneumonia" is an ancestor of both and must not appear
        assert!(!neighbors.get(&3).is_some_and(|n| n.contains(&2)));
        assert!(!neighbors.get(&4).is_some_and(|n| n.contains(&2)));
        if let Some(list) = neighbors.get(&2) {
            assert!(!list.contains(&3));
            assert!(!list.contains(&4));
        }

        // No neighbor list contains an ancestor or descendant of its key
        for (&sctid, list) in &neighbors {
            let descendants = graph.descendants(sctid);
            let ancestors = graph.ancestors(sctid);
            for n in list {
                assert!(!descendants.contains(n));
                assert!(!ancestors.contains(n));
            }
        }
    }

    #[test]
    fn test_unrelated_term_has_no_neighbors() {
        let graph = pneumonia_graph();
        let matrix = TermMatrix::build(&graph, 2, 10);
        let pairs = find_candidate_pairs(&matrix, 1000, 4, false);
        let neighbors = filter_hierarchical(&graph, &matrix, &pairs);
        // "Fracture of femur" shares almost nothing with the pneumonia terms
        assert!(neighbors.get(&5).is_none_or(|n| !n.contains(&3)));
    }
}
