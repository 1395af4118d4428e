//! Project manifest loading.
//!
//! The manifest stands in for the file walker and the per-language import
//! extractors: it lists every project entry and the raw imports of each file.
//!
//! ```json
//! { "files": [ { "path": "internal/domain/user.go",
//!                "imports": [ "fmt", { "specifier": "../app/x", "is_relative_hint": true } ] } ] }
//! ```
//!
//! Imports may be plain strings or objects.

use archgraph_core::{ProjectFile, ProjectInput, RawImport};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Reads the manifest from stdin when passed as the path.
pub const STDIN_PATH: &str = "-";

/// Manifest loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// IO error reading the manifest.
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Invalid JSON or unexpected shape.
    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level manifest document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    /// Entries in walk order.
    #[serde(default)]
    pub files: Vec<ManifestEntry>,
}

/// One walked entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    /// Project-relative path.
    pub path: String,
    /// Absolute path on disk.
    #[serde(default)]
    pub absolute_path: Option<String>,
    /// Whether the entry is a directory.
    #[serde(default)]
    pub is_directory: bool,
    /// Raw imports extracted from the file.
    #[serde(default)]
    pub imports: Vec<ManifestImport>,
}

/// An import given either as a bare specifier or in full.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ManifestImport {
    /// `"../app/x"`
    Specifier(String),
    /// `{ "specifier": "../app/x", "is_relative_hint": true }`
    Full(RawImport),
}

impl From<ManifestImport> for RawImport {
    fn from(import: ManifestImport) -> Self {
        match import {
            ManifestImport::Specifier(s) => RawImport::new(s),
            ManifestImport::Full(raw) => raw,
        }
    }
}

impl Manifest {
    /// Loads a manifest from a file, or from stdin for [`STDIN_PATH`].
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let io_error = |source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        };

        let content = if path.as_os_str() == STDIN_PATH {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map_err(io_error)?;
            buf
        } else {
            std::fs::read_to_string(path).map_err(io_error)?
        };
        Self::parse(&content)
    }

    /// Parses a manifest from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Converts the manifest into analyzer input.
    #[must_use]
    pub fn into_input(self) -> ProjectInput {
        let mut input = ProjectInput::new();
        for entry in self.files {
            let mut file = if entry.is_directory {
                ProjectFile::directory(&entry.path)
            } else {
                ProjectFile::new(&entry.path)
            };
            if let Some(absolute) = entry.absolute_path {
                file = file.with_absolute_path(absolute);
            }
            if !entry.imports.is_empty() {
                let imports = entry.imports.into_iter().map(RawImport::from).collect();
                input.set_imports(&file.path, imports);
            }
            input.push_file(file);
        }
        input
    }
}
