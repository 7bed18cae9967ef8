//! Pipeline configuration

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use vouch_llm::ModelPolicy;
use vouch_retriever::RetrievalParams;

/// Retrieval settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Maximum evidence chunks per query
    pub limit: usize,

    /// Minimum similarity score for a chunk to count as evidence
    pub min_score: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            limit: 5,
            min_score: 0.3,
        }
    }
}

impl From<RetrievalConfig> for RetrievalParams {
    fn from(config: RetrievalConfig) -> Self {
        Self {
            limit: config.limit,
            min_score: config.min_score,
        }
    }
}

/// Generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Provider endpoint for registry-built clients
    pub endpoint: String,

    /// Maximum time for one generation call (seconds)
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            timeout_secs: 60,
        }
    }
}

impl GenerationConfig {
    /// The generation timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Full pipeline configuration, TOML round-trippable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Retrieval settings
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Model selection policy
    #[serde(default = "default_policy")]
    pub policy: ModelPolicy,
}

fn default_policy() -> ModelPolicy {
    ModelPolicy::fallback_only("llama3")
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            retrieval: RetrievalConfig::default(),
            generation: GenerationConfig::default(),
            policy: default_policy(),
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a TOML file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| PipelineError::Config(format!("read failed: {}", e)))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| PipelineError::Config(format!("parse failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.retrieval.limit == 0 {
            return Err(PipelineError::Config(
                "retrieval.limit must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.retrieval.min_score) {
            return Err(PipelineError::Config(format!(
                "retrieval.min_score {} outside [0.0, 1.0]",
                self.retrieval.min_score
            )));
        }
        if self.generation.timeout_secs == 0 {
            return Err(PipelineError::Config(
                "generation.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.policy.fallback.is_empty() {
            return Err(PipelineError::Config(
                "policy.fallback must name a model".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let mut config = PipelineConfig::default();
        config.retrieval.limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_min_score_out_of_range_rejected() {
        let mut config = PipelineConfig::default();
        config.retrieval.min_score = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = PipelineConfig::default();
        let rendered = toml::to_string(&config).unwrap();
        let parsed: PipelineConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.retrieval.limit, config.retrieval.limit);
        assert_eq!(parsed.policy.fallback, config.policy.fallback);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[retrieval]
limit = 3
min_score = 0.4

[generation]
endpoint = "http://localhost:11434"
timeout_secs = 30

[policy]
fallback = "mistral"

[[policy.rules]]
tenant = "acme"
model = "llama3"
"#
        )
        .unwrap();

        let config = PipelineConfig::from_path(file.path()).unwrap();
        assert_eq!(config.retrieval.limit, 3);
        assert_eq!(config.policy.fallback, "mistral");
        assert_eq!(config.policy.rules.len(), 1);
        assert_eq!(config.policy.select("acme", "rag_strict", None), "llama3");
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = PipelineConfig::from_path("/nonexistent/config.toml");
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }
}
