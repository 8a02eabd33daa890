//! Shared unit-test fixtures for building small synthetic ontologies.

use crate::coverage::TranslationCoverage;
use crate::models::{Concept, Relationship, RelationshipGroup, SctId};

/// Build a concept with the given parents and no relationship groups
pub fn concept(sctid: SctId, fsn: &str, parents: &[SctId]) -> Concept {
    let mut c = Concept::new(sctid, fsn);
    c.parents = parents.to_vec();
    c
}

/// Build a concept with parents and a single relationship group
pub fn concept_with_group(
    sctid: SctId,
    fsn: &str,
    parents: &[SctId],
    targets: &[SctId],
) -> Concept {
    let mut c = concept(sctid, fsn, parents);
    c.relationship_groups.push(RelationshipGroup {
        group: 1,
        relationships: targets
            .iter()
            .map(|&target| Relationship {
                type_name: "Associated with".to_string(),
                type_id: 47429007,
                target,
            })
            .collect(),
    });
    c
}

/// Build a coverage set where every listed concept has one synonym
pub fn coverage(language: &str, ids: &[SctId]) -> TranslationCoverage {
    TranslationCoverage::from_entries(
        language,
        ids.iter().map(|&id| (id, format!("term-{id}"))),
    )
}
