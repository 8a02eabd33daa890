//! N-gram featurization of concept names.
//!
//! Every concept's tag-stripped, lowercased name becomes a binary feature
//! vector over the character n-grams it contains. The matrix keeps one
//! postings list per n-gram so chunked scoring never touches names that
//! share nothing with the probe.

use crate::graph::OntologyGraph;
use crate::models::SctId;
use rustc_hash::{FxHashMap, FxHashSet};

/// Binary term × n-gram matrix over the full concept universe
#[derive(Debug, Clone)]
pub struct TermMatrix {
    /// Row index to concept id, ascending
    ids: Vec<SctId>,
    /// Row index to sorted distinct feature ids
    features: Vec<Vec<u32>>,
    /// Feature id to ascending row indices containing it
    postings: Vec<Vec<u32>>,
}

impl TermMatrix {
    /// Featurize every concept name in the graph
    #[must_use]
    pub fn build<G: OntologyGraph>(graph: &G, ngram_min: usize, ngram_max: usize) -> Self {
        let ids: Vec<SctId> = graph.concept_ids().to_vec();
        let mut vocab: FxHashMap<String, u32> = FxHashMap::default();
        let mut features: Vec<Vec<u32>> = Vec::with_capacity(ids.len());

        for &sctid in &ids {
            let term = graph
                .concept(sctid)
                .map(|c| c.bare_term().to_lowercase())
                .unwrap_or_default();
            let mut row: Vec<u32> = char_ngrams(&term, ngram_min, ngram_max)
                .into_iter()
                .map(|ngram| {
                    let next = vocab.len() as u32;
                    *vocab.entry(ngram).or_insert(next)
                })
                .collect();
            row.sort_unstable();
            features.push(row);
        }

        let mut postings: Vec<Vec<u32>> = vec![Vec::new(); vocab.len()];
        for (row, row_features) in features.iter().enumerate() {
            for &feature in row_features {
                postings[feature as usize].push(row as u32);
            }
        }

        Self {
            ids,
            features,
            postings,
        }
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn num_features(&self) -> usize {
        self.postings.len()
    }

    /// Concept id of a row
    #[must_use]
    pub fn id(&self, row: usize) -> SctId {
        self.ids[row]
    }

    /// Sorted distinct feature ids of a row
    #[must_use]
    pub fn row_features(&self, row: usize) -> &[u32] {
        &self.features[row]
    }

    /// Rows containing a feature, ascending
    #[must_use]
    pub fn postings(&self, feature: u32) -> &[u32] {
        &self.postings[feature as usize]
    }
}

/// Distinct character n-grams of a term for every length in the range
fn char_ngrams(term: &str, min_n: usize, max_n: usize) -> FxHashSet<String> {
    let chars: Vec<char> = term.chars().collect();
    let mut ngrams = FxHashSet::default();
    for n in min_n..=max_n {
        if n > chars.len() {
            break;
        }
        for window in chars.windows(n) {
            ngrams.insert(window.iter().collect());
        }
    }
    ngrams
}
