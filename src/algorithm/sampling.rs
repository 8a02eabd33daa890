//! Quota-based stratified sampling over the stratification table.
//!
//! Sampling is an explicit two-phase process: first an index from
//! stratification cell to eligible row positions, then a bounded random
//! draw per cell. Both phases are deterministic given the table and the
//! seed.

use crate::models::{CellKey, SampleRow, StratumRow};
use log::info;
use rand::prelude::*;
use rand::seq::SliceRandom;
use rustc_hash::{FxHashMap, FxHashSet};
use std::time::Instant;

/// Map each stratification cell to the positions of its eligible rows.
///
/// Eligible rows have a translation, sit in a configured hierarchy and are
/// classified on all six keys; everything else is dropped.
#[must_use]
pub fn build_cell_index(
    rows: &[StratumRow],
    hierarchies: &[String],
) -> FxHashMap<CellKey, Vec<usize>> {
    let allowed: FxHashSet<&str> = hierarchies.iter().map(String::as_str).collect();
    let mut index: FxHashMap<CellKey, Vec<usize>> = FxHashMap::default();
    for (position, row) in rows.iter().enumerate() {
        if !row.has_translation || !allowed.contains(row.hierarchy.as_str()) {
            continue;
        }
        let Some(key) = row.cell_key() else {
            continue;
        };
        index.entry(key).or_default().push(position);
    }
    index
}

/// Draw up to `quota` rows per cell without replacement, uniformly.
///
/// Cells are visited in sorted key order with a single generator, so a
/// fixed seed reproduces the sample exactly.
#[must_use]
pub fn draw_cell_samples(
    rows: &[StratumRow],
    index: &FxHashMap<CellKey, Vec<usize>>,
    quota: usize,
    seed: Option<u64>,
) -> Vec<SampleRow> {
    let start = Instant::now();
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut cells: Vec<(&CellKey, &Vec<usize>)> = index.iter().collect();
    cells.sort_by(|a, b| a.0.cmp(b.0));

    let mut samples = Vec::new();
    for (_, members) in cells {
        let take = members.len().min(quota);
        let mut candidates = members.clone();
        candidates.partial_shuffle(&mut rng, take);
        for &position in &candidates[..take] {
            let row = &rows[position];
            samples.push(SampleRow {
                sctid: row.sctid,
                language: row.language.clone(),
                fsn: row.fsn.clone(),
                reference_translations: row.reference_translations.clone().unwrap_or_default(),
            });
        }
    }

    info!(
        "Sampled {} rows from {} non-empty cells (quota {}) in {:.2?}",
        samples.len(),
        index.len(),
        quota,
        start.elapsed()
    );
    samples
}
