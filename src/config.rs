//! Engine configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::answer::{default_rules, CategoryRule};
use crate::error::{Result, RetrievalError};
use crate::vectorizer::evaluate::scoring::SimilarityWeights;
use crate::vectorizer::DEFAULT_MAX_VOCABULARY_SIZE;

/// Settings passed to the engine at construction.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    #[serde(default = "default_max_vocabulary_size")]
    pub max_vocabulary_size: usize,
    #[serde(default = "bool_true")]
    pub synonym_expansion: bool,
    #[serde(default = "default_relevance_threshold")]
    pub relevance_threshold: f64,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_max_answer_chunks")]
    pub max_answer_chunks: usize,
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
    #[serde(default = "default_cosine_weight")]
    pub cosine_weight: f64,
    #[serde(default = "default_overlap_weight")]
    pub overlap_weight: f64,
    #[serde(default = "bool_true")]
    pub follow_up_suggestions: bool,
    /// Ordered; the first matching rule wins
    #[serde(default = "default_rules")]
    pub classifier_rules: Vec<CategoryRule>,
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

fn default_max_vocabulary_size() -> usize { DEFAULT_MAX_VOCABULARY_SIZE }
fn bool_true() -> bool { true }
fn default_relevance_threshold() -> f64 { 0.15 }
fn default_top_k() -> usize { 5 }
fn default_max_answer_chunks() -> usize { 3 }
fn default_max_chunk_chars() -> usize { 250 }
fn default_cosine_weight() -> f64 { 0.7 }
fn default_overlap_weight() -> f64 { 0.3 }
fn default_data_file() -> PathBuf { PathBuf::from("data/scraped_texts.txt") }
fn default_cache_dir() -> PathBuf { PathBuf::from("cache") }

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_vocabulary_size: default_max_vocabulary_size(),
            synonym_expansion: true,
            relevance_threshold: default_relevance_threshold(),
            top_k: default_top_k(),
            max_answer_chunks: default_max_answer_chunks(),
            max_chunk_chars: default_max_chunk_chars(),
            cosine_weight: default_cosine_weight(),
            overlap_weight: default_overlap_weight(),
            follow_up_suggestions: true,
            classifier_rules: default_rules(),
            data_file: default_data_file(),
            cache_dir: default_cache_dir(),
        }
    }
}

impl RetrievalConfig {
    /// Load and validate a TOML config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RetrievalError::io(path, e))?;
        let config: Self = toml::from_str(&content).map_err(|source| RetrievalError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(RetrievalError::InvalidConfig(msg)) };
        for (name, weight) in [("cosine_weight", self.cosine_weight), ("overlap_weight", self.overlap_weight)] {
            if !weight.is_finite() || weight < 0.0 {
                return invalid(format!("{name} must be finite and non-negative, got {weight}"));
            }
        }
        if !self.relevance_threshold.is_finite() {
            return invalid(format!("relevance_threshold must be finite, got {}", self.relevance_threshold));
        }
        for (name, value) in [
            ("top_k", self.top_k),
            ("max_answer_chunks", self.max_answer_chunks),
            ("max_chunk_chars", self.max_chunk_chars),
            ("max_vocabulary_size", self.max_vocabulary_size),
        ] {
            if value == 0 {
                return invalid(format!("{name} must be at least 1"));
            }
        }
        Ok(())
    }

    /// Create the data-file parent and the cache directory.
    ///
    /// Loading a config never touches the filesystem beyond reading it; the
    /// host calls this once at startup.
    pub fn ensure_dirs(&self) -> Result<()> {
        let data_parent = self
            .data_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty());
        for dir in data_parent.into_iter().chain([self.cache_dir.as_path()]) {
            std::fs::create_dir_all(dir).map_err(|e| RetrievalError::io(dir, e))?;
        }
        info!(cache_dir = %self.cache_dir.display(), "directories ready");
        Ok(())
    }

    pub fn weights(&self) -> SimilarityWeights {
        SimilarityWeights {
            cosine: self.cosine_weight,
            overlap: self.overlap_weight,
        }
    }
}
