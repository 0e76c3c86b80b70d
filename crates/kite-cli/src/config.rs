//! Small TOML-loadable configuration, following `legalis-cli::config::Config`'s
//! `Config::load()` / `Config::from_file()` shape scaled down to what the
//! demonstration binary actually needs to configure: the pipeline's
//! concurrency posture and the default search page size.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default location searched by [`Config::load`].
const DEFAULT_CONFIG_PATH: &str = "kite.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Bounded concurrency for `validate_batch` (§4.2 fixes this at 10;
    /// configurable here only for experimentation, never exceeding it
    /// silently changes spec semantics, so callers raising it should know
    /// they're off the pinned default).
    #[serde(default = "default_batch_concurrency")]
    pub batch_concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_concurrency: default_batch_concurrency(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
        }
    }
}

fn default_batch_concurrency() -> usize {
    10
}

fn default_page_size() -> usize {
    20
}

impl Config {
    /// Loads from `./kite.toml` if present, falling back to defaults.
    /// Never fails: a missing or unreadable default config file is not an
    /// error, only an explicit `--config` path is.
    #[must_use]
    pub fn load() -> Self {
        match fs::read_to_string(DEFAULT_CONFIG_PATH) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_spec_pinned_batch_concurrency() {
        let config = Config::default();
        assert_eq!(config.pipeline.batch_concurrency, 10);
    }

    #[test]
    fn from_file_parses_partial_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kite.toml");
        std::fs::write(&path, "[search]\ndefault_page_size = 50\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.search.default_page_size, 50);
        assert_eq!(config.pipeline.batch_concurrency, 10);
    }
}
