//! A Rust library for drawing a representative, context-balanced sample of
//! concepts from a large clinical ontology for translation-quality studies:
//! coverage-aware tier classification, bounded-memory lexical similarity
//! search and quota-based stratified sampling.

pub mod algorithm;
pub mod checkpoint;
pub mod config;
pub mod coverage;
pub mod error;
pub mod graph;
pub mod models;
pub mod pipeline;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{RunConfig, StudyConfig, StudyPaths};
pub use error::{Result, StudyError};
pub use models::{Concept, SampleRow, SctId, StratumRow};

// Graph capability
pub use graph::{InMemoryGraph, OntologyGraph, load::load_snapshot};

// Coverage
pub use coverage::{TranslationCoverage, load::load_coverage};

// Classification and sampling
pub use algorithm::similarity::LexicalIndex;
pub use pipeline::{StudyOutcome, resume_sampling, run_study};
