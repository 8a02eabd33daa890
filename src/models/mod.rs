//! Data structures for concepts, tier labels and stratification rows.

pub mod concept;
pub mod row;
pub mod tiers;

pub use concept::{Concept, Relationship, RelationshipGroup, SctId, hierarchy_tag, strip_hierarchy_tag};
pub use row::{CellCount, CellKey, SampleRow, StratumRow};
pub use tiers::{ContextTier, DepthTier, LengthBucket, SimilarityTier};
