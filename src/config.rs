//! Analyzer configuration.
//!
//! Read from `usagescope.toml` at the project root, or from an explicit
//! path. Every key is optional.
//!
//! ```toml
//! usage_example_cap = 5
//! parallel = false
//! aliases = { "_" = "lodash-es" }
//!
//! [risk]
//! high_threshold = 20.0
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::analysis::{RiskWeights, DEFAULT_USAGE_EXAMPLE_CAP};

/// File name picked up from the project root.
pub const CONFIG_FILE_NAME: &str = "usagescope.toml";

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

fn default_ignored_dirs() -> Vec<String> {
    ["node_modules", ".git", "dist", "build", ".next", "coverage", ".turbo"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Per-file cap on recorded usage examples.
    pub usage_example_cap: usize,
    /// Parse and extract files on the rayon pool.
    pub parallel: bool,
    /// Extract files with syntax errors from the recovered tree instead of skipping them.
    pub tolerate_syntax_errors: bool,
    /// Merge devDependencies into the tracked set.
    pub include_dev_dependencies: bool,
    /// Extra identifier -> package aliases.
    pub aliases: BTreeMap<String, String>,
    /// Directory names skipped when walking a project.
    pub ignored_dirs: Vec<String>,
    pub risk: RiskWeights,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            usage_example_cap: DEFAULT_USAGE_EXAMPLE_CAP,
            parallel: true,
            tolerate_syntax_errors: false,
            include_dev_dependencies: true,
            aliases: BTreeMap::new(),
            ignored_dirs: default_ignored_dirs(),
            risk: RiskWeights::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: AnalyzerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load `usagescope.toml` from `root` if present, defaults otherwise.
    pub fn discover(root: &Path) -> ConfigResult<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.usage_example_cap == 0 {
            return Err(ConfigError::Invalid(
                "usage_example_cap must be at least 1".to_string(),
            ));
        }

        let risk = &self.risk;
        let values = [
            ("usage_weight", risk.usage_weight),
            ("symbol_weight", risk.symbol_weight),
            ("complexity_weight", risk.complexity_weight),
            ("medium_threshold", risk.medium_threshold),
            ("high_threshold", risk.high_threshold),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "risk.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if risk.high_threshold < risk.medium_threshold {
            return Err(ConfigError::Invalid(format!(
                "risk.high_threshold ({}) is below risk.medium_threshold ({})",
                risk.high_threshold, risk.medium_threshold
            )));
        }
        for (ident, pkg) in &self.aliases {
            if ident.is_empty() || pkg.is_empty() {
                return Err(ConfigError::Invalid(
                    "aliases entries need a non-empty identifier and package".to_string(),
                ));
            }
        }
        Ok(())
    }
}
