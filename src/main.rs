use anyhow::Context;
use concept_strata::checkpoint;
use concept_strata::{RunConfig, load_coverage, load_snapshot, run_study};
use log::info;
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "study_config.json".to_string());
    let run_config = RunConfig::from_json_file(Path::new(&config_path))
        .with_context(|| format!("Failed to load run configuration from {config_path}"))?;

    let threads = num_cpus::get();
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .context("Failed to initialise the thread pool")?;
    info!("Using up to {threads} threads for chunked similarity search");

    let paths = &run_config.paths;
    let start = Instant::now();
    let graph = load_snapshot(&paths.nodes, &paths.edges)
        .context("Failed to load the ontology snapshot")?;

    let mut coverages = Vec::with_capacity(run_config.study.languages.len());
    for language in &run_config.study.languages {
        let coverage_path = paths.coverage_dir.join(format!("{language}.parquet"));
        let coverage = load_coverage(language, &coverage_path)
            .with_context(|| format!("Failed to load coverage for language '{language}'"))?;
        coverages.push(coverage);
    }
    info!("Loaded inputs in {:.2?}", start.elapsed());

    let outcome = run_study(&graph, &coverages, &run_config.study)?;

    std::fs::create_dir_all(&paths.output_dir)
        .with_context(|| format!("Failed to create {}", paths.output_dir.display()))?;
    checkpoint::write_stratification(&paths.output_dir.join("stratification.parquet"), &outcome.rows)?;
    checkpoint::write_cell_counts(&paths.output_dir.join("cell_counts.parquet"), &outcome.cell_counts)?;
    checkpoint::write_samples(&paths.output_dir.join("sample.parquet"), &outcome.samples)?;

    info!(
        "Run complete in {:.2?}: {} sampled rows across {} languages",
        start.elapsed(),
        outcome.samples.len(),
        run_config.study.languages.len()
    );
    Ok(())
}
