//! Read-only ontology graph capability.
//!
//! The stratification pipeline never builds or mutates the concept DAG; it
//! only queries an injected [`OntologyGraph`]. [`InMemoryGraph`] is the one
//! concrete implementation, assembled from a two-table snapshot by
//! [`load::load_snapshot`].

pub mod load;

use crate::models::{Concept, SctId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// IS-A relationship type id in the source terminology
pub const IS_A_TYPE_ID: SctId = 116680003;

/// The designated root concept of the ontology
pub const ROOT_CONCEPT_ID: SctId = 138875005;

const NO_IDS: &[SctId] = &[];

/// Query capability over the concept DAG
pub trait OntologyGraph {
    /// Whether the graph contains the concept
    fn contains(&self, sctid: SctId) -> bool;

    /// Full concept data, if present
    fn concept(&self, sctid: SctId) -> Option<&Concept>;

    /// Direct IS-A parents; empty for the root and for unknown ids
    fn parents(&self, sctid: SctId) -> &[SctId];

    /// Direct IS-A children
    fn children(&self, sctid: SctId) -> &[SctId];

    /// Transitive closure of children, excluding the concept itself
    fn descendants(&self, sctid: SctId) -> FxHashSet<SctId>;

    /// Transitive closure of parents, excluding the concept itself and the root
    fn ancestors(&self, sctid: SctId) -> FxHashSet<SctId>;

    /// Shortest IS-A node path from the concept to the root, inclusive of
    /// both endpoints. `None` when the concept is unknown or disconnected.
    fn path_to_root(&self, sctid: SctId) -> Option<Vec<SctId>>;

    /// All concept ids in ascending order
    fn concept_ids(&self) -> &[SctId];

    /// Number of concepts
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Concept DAG held fully in memory
#[derive(Debug, Clone)]
pub struct InMemoryGraph {
    concepts: FxHashMap<SctId, Concept>,
    children: FxHashMap<SctId, Vec<SctId>>,
    ids: Vec<SctId>,
    root: SctId,
}

impl InMemoryGraph {
    /// Build a graph rooted at [`ROOT_CONCEPT_ID`]
    #[must_use]
    pub fn new(concepts: Vec<Concept>) -> Self {
        Self::with_root(concepts, ROOT_CONCEPT_ID)
    }

    /// Build a graph with an explicit root concept id
    #[must_use]
    pub fn with_root(concepts: Vec<Concept>, root: SctId) -> Self {
        let mut ids: Vec<SctId> = concepts.iter().map(|c| c.sctid).collect();
        ids.sort_unstable();
        ids.dedup();

        let mut children: FxHashMap<SctId, Vec<SctId>> = FxHashMap::default();
        for concept in &concepts {
            for &parent in &concept.parents {
                children.entry(parent).or_default().push(concept.sctid);
            }
        }
        for child_ids in children.values_mut() {
            child_ids.sort_unstable();
            child_ids.dedup();
        }

        let concepts = concepts.into_iter().map(|c| (c.sctid, c)).collect();
        Self {
            concepts,
            children,
            ids,
            root,
        }
    }

    /// The designated root concept id
    #[must_use]
    pub const fn root(&self) -> SctId {
        self.root
    }
}

impl OntologyGraph for InMemoryGraph {
    fn contains(&self, sctid: SctId) -> bool {
        self.concepts.contains_key(&sctid)
    }

    fn concept(&self, sctid: SctId) -> Option<&Concept> {
        self.concepts.get(&sctid)
    }

    fn parents(&self, sctid: SctId) -> &[SctId] {
        self.concepts.get(&sctid).map_or(NO_IDS, |c| &c.parents)
    }

    fn children(&self, sctid: SctId) -> &[SctId] {
        self.children.get(&sctid).map_or(NO_IDS, Vec::as_slice)
    }

    fn descendants(&self, sctid: SctId) -> FxHashSet<SctId> {
        let mut seen = FxHashSet::default();
        let mut queue: VecDeque<SctId> = self.children(sctid).iter().copied().collect();
        while let Some(current) = queue.pop_front() {
            if seen.insert(current) {
                queue.extend(self.children(current).iter().copied());
            }
        }
        seen
    }

    fn ancestors(&self, sctid: SctId) -> FxHashSet<SctId> {
        let mut seen = FxHashSet::default();
        let mut queue: VecDeque<SctId> = self.parents(sctid).iter().copied().collect();
        while let Some(current) = queue.pop_front() {
            if seen.insert(current) {
                queue.extend(self.parents(current).iter().copied());
            }
        }
        seen.remove(&self.root);
        seen
    }

    fn path_to_root(&self, sctid: SctId) -> Option<Vec<SctId>> {
        if !self.contains(sctid) {
            return None;
        }
        if sctid == self.root {
            return Some(vec![self.root]);
        }

        // Breadth-first search upwards; the first visit of the root is a
        // shortest IS-A path.
        let mut predecessor: FxHashMap<SctId, SctId> = FxHashMap::default();
        let mut queue = VecDeque::from([sctid]);
        while let Some(current) = queue.pop_front() {
            for &parent in self.parents(current) {
                if parent == sctid || predecessor.contains_key(&parent) {
                    continue;
                }
                predecessor.insert(parent, current);
                if parent == self.root {
                    let mut path = vec![self.root];
                    let mut step = self.root;
                    while step != sctid {
                        step = predecessor[&step];
                        path.push(step);
                    }
                    path.reverse();
                    return Some(path);
                }
                queue.push_back(parent);
            }
        }
        None
    }

    fn concept_ids(&self) -> &[SctId] {
        &self.ids
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fixtures::concept;

    fn small_graph() -> InMemoryGraph {
        // root <- a <- b <- c, root <- x, plus b -> x as a second parent
        InMemoryGraph::with_root(
            vec![
                concept(1, "Root (root)", &[]),
                concept(2, "A (disorder)", &[1]),
                concept(3, "B (disorder)", &[2, 5]),
                concept(4, "C (disorder)", &[3]),
                concept(5, "X (finding)", &[1]),
            ],
            1,
        )
    }

    #[test]
    fn test_parents_and_children() {
        let graph = small_graph();
        assert_eq!(graph.parents(3), &[2, 5]);
        assert_eq!(graph.children(1), &[2, 5]);
        assert_eq!(graph.children(4), &[] as &[SctId]);
        assert_eq!(graph.parents(99), &[] as &[SctId]);
    }

    #[test]
    fn test_descendants_and_ancestors() {
        let graph = small_graph();
        let descendants = graph.descendants(1);
        assert_eq!(descendants.len(), 4);
        assert!(descendants.contains(&4));

        let ancestors = graph.ancestors(4);
        // The root is excluded from ancestor closures
        assert!(!ancestors.contains(&1));
        assert!(ancestors.contains(&2));
        assert!(ancestors.contains(&3));
        assert!(ancestors.contains(&5));
    }

    #[test]
    fn test_path_to_root_is_shortest() {
        let graph = small_graph();
        // c -> b -> x -> root is shorter than c -> b -> a -> root only in
        // edge count ties; both have 3 edges, so the path length must be 4
        let path = graph.path_to_root(4).unwrap();
        assert_eq!(path.first(), Some(&4));
        assert_eq!(path.last(), Some(&1));
        assert_eq!(path.len(), 4);

        assert_eq!(graph.path_to_root(1), Some(vec![1]));
        assert_eq!(graph.path_to_root(99), None);
    }

    #[test]
    fn test_disconnected_concept_has_no_path() {
        let graph = InMemoryGraph::with_root(
            vec![concept(1, "Root (root)", &[]), concept(7, "Orphan (disorder)", &[])],
            1,
        );
        assert_eq!(graph.path_to_root(7), None);
    }

    #[test]
    fn test_concept_ids_sorted() {
        let graph = small_graph();
        assert_eq!(graph.concept_ids(), &[1, 2, 3, 4, 5]);
        assert_eq!(graph.len(), 5);
        assert!(!graph.is_empty());
    }
}
