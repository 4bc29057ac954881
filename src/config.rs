use crate::error::{PipelineError, Result};
use crate::tokenizer::DEFAULT_MAX_LENGTH;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Bundled ONNX model asset, copied into `cache_dir` on first use.
    pub model_path: PathBuf,
    /// Newline-delimited vocabulary file, read in place.
    pub vocab_path: PathBuf,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

fn default_cache_dir() -> PathBuf {
    std::env::temp_dir().join("sentibert")
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("assets/bert.onnx"),
            vocab_path: PathBuf::from("assets/vocab.txt"),
            cache_dir: default_cache_dir(),
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(model_path) = std::env::var("SENTIBERT_MODEL_PATH") {
            config.model_path = PathBuf::from(model_path);
        }

        if let Ok(vocab_path) = std::env::var("SENTIBERT_VOCAB_PATH") {
            config.vocab_path = PathBuf::from(vocab_path);
        }

        if let Ok(cache_dir) = std::env::var("SENTIBERT_CACHE_DIR") {
            config.cache_dir = PathBuf::from(cache_dir);
        }

        if let Ok(max_length_str) = std::env::var("SENTIBERT_MAX_LENGTH") {
            if let Ok(max_length) = max_length_str.parse::<usize>() {
                config.max_length = max_length;
            }
        }

        config
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::Config(format!("failed to read config file: {}", e)))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| PipelineError::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.model_path.as_os_str().is_empty() {
            return Err(PipelineError::Config(
                "model path cannot be empty".to_string(),
            ));
        }

        if self.vocab_path.as_os_str().is_empty() {
            return Err(PipelineError::Config(
                "vocabulary path cannot be empty".to_string(),
            ));
        }

        if self.max_length == 0 {
            return Err(PipelineError::Config(
                "max sequence length must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
