//! End-to-end stratification and sampling pipeline.
//!
//! A single-threaded batch orchestration (chunk-level parallelism inside the
//! similarity search aside): classify every axis, join the table, summarize
//! cell sizes and draw the sample. It runs to completion or fails; there is
//! no partial-failure protocol beyond re-running from the checkpoint table.

use crate::algorithm::context::classify_context;
use crate::algorithm::depth::classify_depth;
use crate::algorithm::length::classify_length;
use crate::algorithm::sampling::{build_cell_index, draw_cell_samples};
use crate::algorithm::similarity::LexicalIndex;
use crate::algorithm::stratify::{TierAssignments, build_stratification_table, cell_size_summary};
use crate::config::StudyConfig;
use crate::coverage::TranslationCoverage;
use crate::error::{Result, StudyError};
use crate::graph::OntologyGraph;
use crate::models::{CellCount, SampleRow, StratumRow};
use log::info;
use std::time::Instant;

/// Everything one pipeline run produces
#[derive(Debug, Clone)]
pub struct StudyOutcome {
    /// The checkpoint table: one row per concept per language
    pub rows: Vec<StratumRow>,
    /// Cell-size pivot over the full table
    pub cell_counts: Vec<CellCount>,
    /// The drawn sample, bounded by cells × quota
    pub samples: Vec<SampleRow>,
}

/// Run the full pipeline over loaded inputs.
///
/// Configuration and coverage are validated before any expensive phase; a
/// missing or empty coverage set for a configured language is a
/// configuration error, not a silent empty output.
pub fn run_study<G: OntologyGraph>(
    graph: &G,
    coverages: &[TranslationCoverage],
    config: &StudyConfig,
) -> Result<StudyOutcome> {
    config.validate()?;
    if graph.is_empty() {
        return Err(StudyError::Validation("ontology graph is empty".to_string()));
    }
    let ordered = ordered_coverages(coverages, config)?;

    let start = Instant::now();
    info!(
        "Starting study run: {} concepts, {} languages",
        graph.len(),
        ordered.len()
    );

    let mut tiers = TierAssignments {
        depth: classify_depth(graph),
        length: classify_length(graph),
        ..TierAssignments::default()
    };

    let index = LexicalIndex::build(graph, config)?;
    for coverage in &ordered {
        let language = coverage.language().to_string();
        tiers
            .context
            .insert(language.clone(), classify_context(graph, coverage));
        tiers
            .similarity
            .insert(language, index.classify_similarity(graph, coverage));
    }

    let rows = build_stratification_table(graph, &ordered, &tiers);
    let cell_counts = cell_size_summary(&rows);

    let cell_index = build_cell_index(&rows, &config.hierarchies);
    let samples = draw_cell_samples(&rows, &cell_index, config.cell_quota, config.random_seed);

    info!(
        "Study run complete: {} table rows, {} cells, {} sampled rows in {:.2?}",
        rows.len(),
        cell_counts.len(),
        samples.len(),
        start.elapsed()
    );
    Ok(StudyOutcome {
        rows,
        cell_counts,
        samples,
    })
}

/// Resume sampling from a previously persisted stratification table.
///
/// Tier computation is skipped entirely; only eligibility filtering and the
/// per-cell draw run.
pub fn resume_sampling(rows: &[StratumRow], config: &StudyConfig) -> Result<Vec<SampleRow>> {
    config.validate()?;
    if rows.is_empty() {
        return Err(StudyError::Validation(
            "stratification table is empty".to_string(),
        ));
    }
    let cell_index = build_cell_index(rows, &config.hierarchies);
    Ok(draw_cell_samples(rows, &cell_index, config.cell_quota, config.random_seed))
}

/// Pick the coverage set for every configured language, in configured order
fn ordered_coverages<'a>(
    coverages: &'a [TranslationCoverage],
    config: &StudyConfig,
) -> Result<Vec<&'a TranslationCoverage>> {
    let mut ordered = Vec::with_capacity(config.languages.len());
    for language in &config.languages {
        let coverage = coverages
            .iter()
            .find(|c| c.language() == language)
            .ok_or_else(|| {
                StudyError::Config(format!("no coverage set loaded for language '{language}'"))
            })?;
        if coverage.is_empty() {
            return Err(StudyError::Config(format!(
                "coverage set for language '{language}' is empty"
            )));
        }
        ordered.push(coverage);
    }
    Ok(ordered)
}
