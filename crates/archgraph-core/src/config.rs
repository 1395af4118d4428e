//! Configuration types for archgraph.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::layer::{Layer, ANY_LAYER};

/// Top-level configuration, usually loaded from `archgraph.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchGraphConfig {
    /// Declared layers in priority order.
    #[serde(default)]
    pub layers: Vec<Layer>,

    /// Graph property limits.
    #[serde(default)]
    pub properties: Properties,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl ArchGraphConfig {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Check structural validity.
    ///
    /// Forbidden pattern syntax is not checked here; malformed patterns are
    /// reported as violations when the rules run.
    ///
    /// # Errors
    ///
    /// Returns error describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names: HashSet<&str> = HashSet::new();
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "layers[{i}]: empty layer name"
                )));
            }
            if layer.path.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "layer '{}': empty path pattern",
                    layer.name
                )));
            }
            if !names.insert(layer.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "layer '{}': declared more than once",
                    layer.name
                )));
            }
        }

        for layer in &self.layers {
            for dep in &layer.depends_on {
                if dep != ANY_LAYER && !names.contains(dep.as_str()) {
                    return Err(ConfigError::Validation(format!(
                        "layer '{}': unknown dependency '{dep}'",
                        layer.name
                    )));
                }
            }
        }

        Ok(())
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<crate::Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Gets the configuration block of a rule.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }
}

/// Graph property limits from the `[properties]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    /// Report dependency cycles.
    #[serde(default = "default_true")]
    pub detect_cycles: bool,

    /// Also report every strongly connected component as an info finding.
    #[serde(default)]
    pub report_components: bool,

    /// Maximum resolved imports per file. Unset disables the check.
    #[serde(default)]
    pub max_dependencies_per_file: Option<usize>,

    /// Maximum dependency chain depth. Unset disables the check.
    #[serde(default)]
    pub max_dependency_depth: Option<usize>,

    /// Do not flag depth for files inside a cycle.
    #[serde(default)]
    pub skip_cyclic_depth: bool,

    /// Rules of the form `"source/** -> target/**"`.
    #[serde(default)]
    pub forbidden_patterns: Vec<String>,

    /// Report files no other project file imports.
    #[serde(default)]
    pub detect_orphans: bool,

    /// Patterns of files loaded from outside the project (binaries, scripts).
    /// Never reported as orphaned.
    #[serde(default)]
    pub entry_points: Vec<String>,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            detect_cycles: true,
            report_components: false,
            max_dependencies_per_file: None,
            max_dependency_depth: None,
            skip_cyclic_depth: false,
            forbidden_patterns: Vec::new(),
            detect_orphans: false,
            entry_points: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<crate::Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets an option value as a specific type.
    #[must_use]
    pub fn get_option<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.options
            .get(key)
            .and_then(|v| v.clone().try_into().ok())
    }

    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets a non-negative integer option.
    #[must_use]
    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .and_then(|v| usize::try_from(v).ok())
    }

    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.options
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Config is structurally invalid.
    #[error("config validation: {0}")]
    Validation(String),
}
