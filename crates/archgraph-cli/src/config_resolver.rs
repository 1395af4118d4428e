//! Locating the configuration that applies to a manifest.
//!
//! `--config` wins. Otherwise the manifest's directory and then each of its
//! ancestors is searched for `archgraph.toml` or `.archgraph.toml`; the
//! nearest file is used. Failing that, `config.toml` in the global directory
//! (`$ARCHGRAPH_CONFIG_DIR`, else `~/.archgraph`) applies, and with nothing
//! found the built-in defaults do.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use archgraph_core::ArchGraphConfig;

/// Project config names, checked in this order in every directory.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["archgraph.toml", ".archgraph.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";
const CONFIG_DIR_ENV: &str = "ARCHGRAPH_CONFIG_DIR";

/// How a configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Named by `--config`.
    Flag,
    /// Found in the manifest directory or one of its ancestors.
    Project,
    /// Found in the global config directory.
    Global,
}

/// Finds and loads `archgraph.toml`.
#[derive(Debug, Clone)]
pub struct ConfigLocator {
    global_dir: Option<PathBuf>,
}

impl ConfigLocator {
    /// Uses `$ARCHGRAPH_CONFIG_DIR` or `~/.archgraph` as the global directory.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_global_dir(
            std::env::var_os(CONFIG_DIR_ENV)
                .map(PathBuf::from)
                .or_else(|| home::home_dir().map(|h| h.join(".archgraph"))),
        )
    }

    /// Uses `dir` as the global directory; `None` disables the global lookup.
    #[must_use]
    pub fn with_global_dir(dir: Option<PathBuf>) -> Self {
        Self { global_dir: dir }
    }

    /// Returns the file that applies, or `None` when defaults should be used.
    ///
    /// An explicit path is returned without checking that it exists.
    #[must_use]
    pub fn locate(&self, start: &Path, explicit: Option<&Path>) -> Option<(Origin, PathBuf)> {
        if let Some(path) = explicit {
            return Some((Origin::Flag, path.to_path_buf()));
        }

        let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
        let nearest = start.ancestors().find_map(|dir| {
            PROJECT_CONFIG_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        });
        if let Some(path) = nearest {
            return Some((Origin::Project, path));
        }

        self.global_dir
            .as_ref()
            .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
            .filter(|candidate| candidate.is_file())
            .map(|path| (Origin::Global, path))
    }

    /// Locates and parses the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the located file cannot be read or parsed.
    pub fn load(&self, start: &Path, explicit: Option<&Path>) -> Result<ArchGraphConfig> {
        let Some((origin, path)) = self.locate(start, explicit) else {
            tracing::debug!("No config file found, using defaults");
            return Ok(ArchGraphConfig::default());
        };
        match origin {
            Origin::Global => tracing::info!("Using global config: {}", path.display()),
            Origin::Flag | Origin::Project => {
                tracing::debug!("Using config: {}", path.display());
            }
        }
        ArchGraphConfig::from_file(&path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}
