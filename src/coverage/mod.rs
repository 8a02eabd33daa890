//! Per-language translation coverage: which concepts already have accepted
//! human translations, and what those translations are.
//!
//! Coverage is built once per language and threaded by reference through the
//! classifiers and the table builder; nothing mutates it after loading.

pub mod load;

use crate::models::SctId;
use rustc_hash::{FxHashMap, FxHashSet};

/// The set of translated concepts for one language, plus their synonyms
#[derive(Debug, Clone, Default)]
pub struct TranslationCoverage {
    language: String,
    translated: FxHashSet<SctId>,
    synonyms: FxHashMap<SctId, Vec<String>>,
}

impl TranslationCoverage {
    /// Create an empty coverage set for a language
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            translated: FxHashSet::default(),
            synonyms: FxHashMap::default(),
        }
    }

    /// Build coverage from (concept, synonym) entries
    #[must_use]
    pub fn from_entries(
        language: impl Into<String>,
        entries: impl IntoIterator<Item = (SctId, String)>,
    ) -> Self {
        let mut coverage = Self::new(language);
        for (sctid, term) in entries {
            coverage.insert(sctid, term);
        }
        coverage
    }

    /// Record one accepted synonym for a concept
    pub fn insert(&mut self, sctid: SctId, term: String) {
        self.translated.insert(sctid);
        self.synonyms.entry(sctid).or_default().push(term);
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether the concept has at least one accepted translation
    #[must_use]
    pub fn contains(&self, sctid: SctId) -> bool {
        self.translated.contains(&sctid)
    }

    /// The synonyms recorded for a concept, if any
    #[must_use]
    pub fn translations(&self, sctid: SctId) -> Option<&[String]> {
        self.synonyms.get(&sctid).map(Vec::as_slice)
    }

    /// Number of translated concepts
    #[must_use]
    pub fn len(&self) -> usize {
        self.translated.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.translated.is_empty()
    }
}
