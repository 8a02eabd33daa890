//! Ontology snapshot loading from node and edge Parquet tables.
//!
//! The snapshot is the pre-digested form of a terminology release: one table
//! of concepts (`sctid`, `fsn`) and one table of typed edges. IS-A edges
//! become parent links; every other edge type lands in the per-concept
//! inferred relationship groups.

use crate::error::{Result, StudyError};
use crate::graph::{IS_A_TYPE_ID, InMemoryGraph};
use crate::models::{Concept, Relationship, RelationshipGroup, SctId};
use crate::utils::parquet::read_rows;
use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

/// One row of the `nodes` snapshot table
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeRecord {
    sctid: SctId,
    fsn: String,
}

/// One row of the `edges` snapshot table
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EdgeRecord {
    source_id: SctId,
    destination_id: SctId,
    relationship_group: i32,
    type_id: SctId,
    type_name: String,
}

/// Load an [`InMemoryGraph`] from node and edge Parquet snapshot tables
pub fn load_snapshot(nodes_path: &Path, edges_path: &Path) -> Result<InMemoryGraph> {
    let start = Instant::now();
    let nodes: Vec<NodeRecord> = read_rows(nodes_path)?;
    let edges: Vec<EdgeRecord> = read_rows(edges_path)?;
    if nodes.is_empty() {
        return Err(StudyError::Validation(format!(
            "snapshot {} contains no concepts",
            nodes_path.display()
        )));
    }
    info!(
        "Read snapshot: {} concepts, {} edges in {:.2?}",
        nodes.len(),
        edges.len(),
        start.elapsed()
    );

    let mut concepts: FxHashMap<SctId, Concept> = nodes
        .into_iter()
        .map(|n| (n.sctid, Concept::new(n.sctid, n.fsn)))
        .collect();

    // Group numbers key the inferred relationship groups, as in the source
    // terminology model.
    let mut groups: FxHashMap<SctId, BTreeMap<i32, Vec<Relationship>>> = FxHashMap::default();
    let mut dangling = 0usize;
    for edge in edges {
        if !concepts.contains_key(&edge.source_id) || !concepts.contains_key(&edge.destination_id) {
            dangling += 1;
            continue;
        }
        if edge.type_id == IS_A_TYPE_ID {
            if let Some(concept) = concepts.get_mut(&edge.source_id) {
                concept.parents.push(edge.destination_id);
            }
        } else {
            groups
                .entry(edge.source_id)
                .or_default()
                .entry(edge.relationship_group)
                .or_default()
                .push(Relationship {
                    type_name: edge.type_name,
                    type_id: edge.type_id,
                    target: edge.destination_id,
                });
        }
    }
    if dangling > 0 {
        warn!("Skipped {dangling} edges referencing concepts absent from the snapshot");
    }

    for (sctid, grouped) in groups {
        if let Some(concept) = concepts.get_mut(&sctid) {
            concept.relationship_groups = grouped
                .into_iter()
                .map(|(group, relationships)| RelationshipGroup {
                    group,
                    relationships,
                })
                .collect();
        }
    }
    for concept in concepts.values_mut() {
        concept.parents.sort_unstable();
        concept.parents.dedup();
    }

    Ok(InMemoryGraph::new(concepts.into_values().collect()))
}
