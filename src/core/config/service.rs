use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::paths::AppPaths;
use crate::core::errors::ApiError;

/// Tunables for chunking, retrieval and the hosted model.
///
/// Loaded from `config.yml` when present, otherwise defaults apply.
/// The provider credential is never stored here; it is read from the
/// `OPENAI_API_KEY` environment variable at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters.
    pub chunk_overlap: usize,
    /// Number of chunks retrieved per question.
    pub top_k: usize,
    /// Number of past exchanges included in each prompt.
    pub memory_window: usize,
    pub chat_model: String,
    pub embedding_model: String,
    /// Sampling temperature for follow-up generation.
    pub follow_up_temperature: f64,
    /// Base URL of the OpenAI-compatible API.
    pub api_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 4,
            memory_window: 10,
            chat_model: "gpt-3.5-turbo".to_string(),
            embedding_model: "text-embedding-ada-002".to_string(),
            follow_up_temperature: 0.7,
            api_base_url: "https://api.openai.com".to_string(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.chunk_size == 0 {
            return Err(ApiError::BadRequest("chunk_size must be positive".to_string()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(ApiError::BadRequest(
                "chunk_overlap must be smaller than chunk_size".to_string(),
            ));
        }
        if self.top_k == 0 {
            return Err(ApiError::BadRequest("top_k must be positive".to_string()));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct ConfigService {
    paths: Arc<AppPaths>,
}

impl ConfigService {
    pub fn new(paths: Arc<AppPaths>) -> Self {
        Self { paths }
    }

    pub fn config_path(&self) -> PathBuf {
        if let Ok(path) = env::var("HRDESK_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        self.paths.project_root.join("config.yml")
    }

    pub fn load(&self) -> Result<AppConfig, ApiError> {
        let path = self.config_path();
        let config = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(ApiError::internal)?;
            serde_yaml::from_str::<AppConfig>(&contents)
                .map_err(|e| ApiError::BadRequest(format!("invalid config.yml: {}", e)))?
        } else {
            AppConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Provider credential, required for chat and embedding calls.
    pub fn api_key(&self) -> Result<String, ApiError> {
        env::var("OPENAI_API_KEY")
            .map_err(|_| ApiError::BadRequest("OPENAI_API_KEY is not set".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.chunk_overlap, 200);
    }

    #[test]
    fn overlap_must_stay_below_chunk_size() {
        let config = AppConfig {
            chunk_overlap: 1000,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_top_k_is_rejected() {
        let config = AppConfig {
            top_k: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
