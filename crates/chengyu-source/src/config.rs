//! Source configuration and factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use chengyu_core::engine::QuizEngineConfig;
use chengyu_core::model::{DisplayMode, QuizVariant};
use chengyu_core::traits::IdiomSource;

use crate::dataset::DatasetIdiomSource;
use crate::http::{HttpIdiomSource, DEFAULT_TIMEOUT_SECS};

/// Where idioms come from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    /// A remote idiom endpoint.
    Http {
        base_url: String,
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
    },
    /// A local JSON dataset file.
    Dataset { path: PathBuf },
    /// The compiled-in starter set.
    #[default]
    Builtin,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Top-level chengyu configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChengyuConfig {
    /// Prompt variant new sessions start with.
    #[serde(default)]
    pub default_variant: QuizVariant,
    /// Start sessions in quiz mode instead of study mode.
    #[serde(default)]
    pub start_in_quiz: bool,
    /// Draw the mixed-mode clue once per question.
    #[serde(default)]
    pub stable_mixed_prompt: bool,
    /// Idiom source.
    #[serde(default)]
    pub source: SourceConfig,
}

impl Default for ChengyuConfig {
    fn default() -> Self {
        Self {
            default_variant: QuizVariant::Meaning,
            start_in_quiz: false,
            stable_mixed_prompt: false,
            source: SourceConfig::Builtin,
        }
    }
}

impl ChengyuConfig {
    /// Engine settings derived from this configuration.
    pub fn engine_config(&self) -> QuizEngineConfig {
        QuizEngineConfig {
            display_mode: if self.start_in_quiz {
                DisplayMode::Quiz
            } else {
                DisplayMode::Study
            },
            quiz_variant: self.default_variant,
            stable_mixed_prompt: self.stable_mixed_prompt,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_source_config(config: &SourceConfig) -> SourceConfig {
    match config {
        SourceConfig::Http {
            base_url,
            timeout_secs,
        } => SourceConfig::Http {
            base_url: resolve_env_vars(base_url),
            timeout_secs: *timeout_secs,
        },
        SourceConfig::Dataset { path } => SourceConfig::Dataset {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
        SourceConfig::Builtin => SourceConfig::Builtin,
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `chengyu.toml` in the current directory
/// 2. `~/.config/chengyu/config.toml`
///
/// Environment variable override: `CHENGYU_SOURCE_URL` selects the HTTP source.
pub fn load_config_from(path: Option<&Path>) -> Result<ChengyuConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("chengyu.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ChengyuConfig::default(),
    };

    if let Ok(url) = std::env::var("CHENGYU_SOURCE_URL") {
        let timeout_secs = match &config.source {
            SourceConfig::Http { timeout_secs, .. } => *timeout_secs,
            _ => DEFAULT_TIMEOUT_SECS,
        };
        config.source = SourceConfig::Http {
            base_url: url,
            timeout_secs,
        };
    }

    config.source = resolve_source_config(&config.source);

    Ok(config)
}

/// Parse a TOML configuration string.
pub fn parse_config(content: &str) -> Result<ChengyuConfig> {
    Ok(toml::from_str::<ChengyuConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("chengyu"))
}

/// Create a source instance from its configuration.
pub fn create_source(config: &SourceConfig) -> Result<Box<dyn IdiomSource>> {
    match config {
        SourceConfig::Http {
            base_url,
            timeout_secs,
        } => Ok(Box::new(HttpIdiomSource::new(base_url, *timeout_secs)?)),
        SourceConfig::Dataset { path } => {
            let source = DatasetIdiomSource::from_path(path)
                .with_context(|| format!("failed to load dataset: {}", path.display()))?;
            if source.total() == 0 {
                tracing::warn!(
                    "dataset {} has no usable idioms; every fetch will fall back",
                    path.display()
                );
            }
            Ok(Box::new(source))
        }
        SourceConfig::Builtin => Ok(Box::new(DatasetIdiomSource::builtin())),
    }
}
