//! Concept and relationship structures mirroring the ontology snapshot.

/// Stable identifier of an ontology concept
pub type SctId = i64;

/// A single inferred defining relationship (IS-A excluded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Attribute type name, e.g. "Finding site"
    pub type_name: String,
    /// Concept id of the attribute type
    pub type_id: SctId,
    /// Target concept id
    pub target: SctId,
}

/// Inferred relationships sharing a role group number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipGroup {
    pub group: i32,
    pub relationships: Vec<Relationship>,
}

/// A concept node: canonical name, IS-A parents and inferred relationship groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concept {
    pub sctid: SctId,
    /// Fully-specified name, disambiguated with a trailing hierarchy tag
    pub fsn: String,
    /// IS-A parent concept ids
    pub parents: Vec<SctId>,
    /// Inferred defining-relationship groups, IS-A excluded
    pub relationship_groups: Vec<RelationshipGroup>,
}

impl Concept {
    #[must_use]
    pub fn new(sctid: SctId, fsn: impl Into<String>) -> Self {
        Self {
            sctid,
            fsn: fsn.into(),
            parents: Vec::new(),
            relationship_groups: Vec::new(),
        }
    }

    /// Hierarchy label taken from the trailing parenthetical tag of the fsn
    #[must_use]
    pub fn hierarchy(&self) -> &str {
        hierarchy_tag(&self.fsn)
    }

    /// Canonical name with the trailing hierarchy tag removed
    #[must_use]
    pub fn bare_term(&self) -> &str {
        strip_hierarchy_tag(&self.fsn)
    }

    /// Relationship targets across every group
    pub fn relationship_targets(&self) -> impl Iterator<Item = SctId> + '_ {
        self.relationship_groups
            .iter()
            .flat_map(|g| g.relationships.iter().map(|r| r.target))
    }
}

/// Extract the trailing parenthetical hierarchy tag of a fully-specified name.
///
/// Returns an empty string when the name carries no tag.
#[must_use]
pub fn hierarchy_tag(fsn: &str) -> &str {
    let trimmed = fsn.trim_end();
    if !trimmed.ends_with(')') {
        return "";
    }
    match trimmed.rfind('(') {
        Some(open) if open + 1 < trimmed.len() => &trimmed[open + 1..trimmed.len() - 1],
        _ => "",
    }
}

/// Remove the trailing parenthetical hierarchy tag of a fully-specified name
#[must_use]
pub fn strip_hierarchy_tag(fsn: &str) -> &str {
    let trimmed = fsn.trim_end();
    if trimmed.ends_with(')') {
        if let Some(open) = trimmed.rfind('(') {
            return trimmed[..open].trim_end();
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_tag_extraction() {
        assert_eq!(hierarchy_tag("Fracture of femur (disorder)"), "disorder");
        assert_eq!(hierarchy_tag("Femur (body structure)"), "body structure");
        assert_eq!(hierarchy_tag("No tag here"), "");
        assert_eq!(hierarchy_tag("Trailing space (finding) "), "finding");
    }

    #[test]
    fn test_strip_hierarchy_tag() {
        assert_eq!(strip_hierarchy_tag("Fracture of femur (disorder)"), "Fracture of femur");
        assert_eq!(strip_hierarchy_tag("No tag here"), "No tag here");
        assert_eq!(
            strip_hierarchy_tag("Closed fracture of shaft of femur (disorder)"),
            "Closed fracture of shaft of femur"
        );
    }

    #[test]
    fn test_relationship_targets() {
        let mut concept = Concept::new(1, "Viral pneumonia (disorder)");
        concept.relationship_groups.push(RelationshipGroup {
            group: 1,
            relationships: vec![
                Relationship {
                    type_name: "Causative agent".to_string(),
                    type_id: 246075003,
                    target: 49872002,
                },
                Relationship {
                    type_name: "Finding site".to_string(),
                    type_id: 363698007,
                    target: 39607008,
                },
            ],
        });

        let targets: Vec<_> = concept.relationship_targets().collect();
        assert_eq!(targets, vec![49872002, 39607008]);
    }
}
