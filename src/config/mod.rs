//! Configuration for the stratification-and-sampling study.

use crate::error::{Result, StudyError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Configuration for one stratification study run
///
/// Defaults reproduce the documented study parameters; the n-gram range and
/// similarity threshold are tunables, not fixed constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Target language codes, e.g. `["da", "sv"]`
    pub languages: Vec<String>,

    /// Top-level hierarchy labels eligible for sampling
    pub hierarchies: Vec<String>,

    /// Smallest character n-gram length used by the similarity index
    pub ngram_min: usize,

    /// Largest character n-gram length used by the similarity index
    pub ngram_max: usize,

    /// Minimum number of distinct shared n-grams for a candidate pair
    pub similarity_threshold: u32,

    /// Concepts per chunk in the similarity search; bounds peak memory
    pub chunk_size: usize,

    /// Maximum rows drawn per stratification cell
    pub cell_quota: usize,

    /// Optional random seed for reproducible sampling
    pub random_seed: Option<u64>,

    /// Whether to process similarity chunks in parallel
    pub use_parallel: bool,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            hierarchies: Vec::new(),
            ngram_min: 2,
            ngram_max: 10,
            similarity_threshold: 2,
            chunk_size: 1000,
            cell_quota: 25,
            random_seed: None,
            use_parallel: true,
        }
    }
}

impl StudyConfig {
    /// Create a new builder for constructing a study configuration
    #[must_use]
    pub fn builder() -> StudyConfigBuilder {
        StudyConfigBuilder::new()
    }

    /// Reject degenerate configuration before any expensive phase runs
    pub fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            return Err(StudyError::Config("no target languages configured".to_string()));
        }
        let distinct: HashSet<&str> = self.languages.iter().map(String::as_str).collect();
        if distinct.len() != self.languages.len() {
            return Err(StudyError::Config("duplicate target language configured".to_string()));
        }
        if self.hierarchies.is_empty() {
            return Err(StudyError::Config(
                "no top-level hierarchies configured for sampling".to_string(),
            ));
        }
        if self.ngram_min == 0 {
            return Err(StudyError::Config("n-gram length must be at least 1".to_string()));
        }
        if self.ngram_min > self.ngram_max {
            return Err(StudyError::Config(format!(
                "invalid n-gram range {}..={}",
                self.ngram_min, self.ngram_max
            )));
        }
        if self.similarity_threshold == 0 {
            return Err(StudyError::Config(
                "similarity threshold must be at least 1".to_string(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(StudyError::Config("chunk size must be at least 1".to_string()));
        }
        if self.cell_quota == 0 {
            return Err(StudyError::Config("cell quota must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Builder for constructing a study configuration
#[derive(Debug, Clone, Default)]
pub struct StudyConfigBuilder {
    config: StudyConfig,
}

impl StudyConfigBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: StudyConfig::default(),
        }
    }

    /// Set the target languages
    #[must_use]
    pub fn languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Set the hierarchies eligible for sampling
    #[must_use]
    pub fn hierarchies<I, S>(mut self, hierarchies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.hierarchies = hierarchies.into_iter().map(Into::into).collect();
        self
    }

    /// Set the character n-gram range
    #[must_use]
    pub const fn ngram_range(mut self, min: usize, max: usize) -> Self {
        self.config.ngram_min = min;
        self.config.ngram_max = max;
        self
    }

    /// Set the minimum shared n-gram count for candidate pairs
    #[must_use]
    pub const fn similarity_threshold(mut self, threshold: u32) -> Self {
        self.config.similarity_threshold = threshold;
        self
    }

    /// Set the similarity search chunk size
    #[must_use]
    pub const fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    /// Set the per-cell sampling quota
    #[must_use]
    pub const fn cell_quota(mut self, quota: usize) -> Self {
        self.config.cell_quota = quota;
        self
    }

    /// Set the random seed
    #[must_use]
    pub const fn random_seed(mut self, seed: u64) -> Self {
        self.config.random_seed = Some(seed);
        self
    }

    /// Set whether to process similarity chunks in parallel
    #[must_use]
    pub const fn use_parallel(mut self, parallel: bool) -> Self {
        self.config.use_parallel = parallel;
        self
    }

    /// Build the study configuration
    #[must_use]
    pub fn build(self) -> StudyConfig {
        self.config
    }
}

/// File locations for a batch run; the library itself only sees loaded inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyPaths {
    /// Parquet table of concepts (`sctid`, `fsn`)
    pub nodes: PathBuf,
    /// Parquet table of typed edges
    pub edges: PathBuf,
    /// Directory with one `<language>.parquet` coverage file per language
    pub coverage_dir: PathBuf,
    /// Directory receiving the checkpoint, pivot and sample artifacts
    pub output_dir: PathBuf,
}

/// Top-level batch run configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub study: StudyConfig,
    pub paths: StudyPaths,
}

impl RunConfig {
    /// Load and validate a run configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.study.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> StudyConfig {
        StudyConfig::builder()
            .languages(["da"])
            .hierarchies(["disorder", "finding"])
            .build()
    }

    #[test]
    fn test_defaults_match_documented_parameters() {
        let config = StudyConfig::default();
        assert_eq!(config.ngram_min, 2);
        assert_eq!(config.ngram_max, 10);
        assert_eq!(config.similarity_threshold, 2);
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.cell_quota, 25);
        assert_eq!(config.random_seed, None);
        assert!(config.use_parallel);
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_degenerate_configs() {
        let mut config = valid_config();
        config.languages.clear();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.languages.push("da".to_string());
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.hierarchies.clear();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.chunk_size = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.cell_quota = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.similarity_threshold = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.ngram_min = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_sets_all_knobs() {
        let config = StudyConfig::builder()
            .languages(["da", "sv"])
            .hierarchies(["disorder"])
            .ngram_range(3, 8)
            .similarity_threshold(4)
            .chunk_size(250)
            .cell_quota(10)
            .random_seed(42)
            .use_parallel(false)
            .build();

        assert_eq!(config.languages, vec!["da", "sv"]);
        assert_eq!(config.ngram_min, 3);
        assert_eq!(config.ngram_max, 8);
        assert_eq!(config.similarity_threshold, 4);
        assert_eq!(config.chunk_size, 250);
        assert_eq!(config.cell_quota, 10);
        assert_eq!(config.random_seed, Some(42));
        assert!(!config.use_parallel);
    }
}
