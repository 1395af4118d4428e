//! Project input handed over by the walker and import extractor.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::pattern::to_slash;

/// Source language, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// `.go`
    Go,
    /// `.py`
    Python,
    /// `.ts`, `.tsx`
    TypeScript,
    /// `.js`, `.jsx`, `.mjs`, `.cjs`
    JavaScript,
    /// `.java`
    Java,
    /// `.cs`
    CSharp,
    /// `.cpp`, `.cc`, `.cxx`, `.hpp`, `.h`
    Cpp,
    /// `.rs`
    Rust,
    /// Anything else.
    Unknown,
}

impl Language {
    /// Derives the language from a path's extension.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let name = crate::pattern::base_name(path);
        let Some((_, ext)) = name.rsplit_once('.') else {
            return Self::Unknown;
        };
        match ext {
            "go" => Self::Go,
            "py" => Self::Python,
            "ts" | "tsx" => Self::TypeScript,
            "js" | "jsx" | "mjs" | "cjs" => Self::JavaScript,
            "java" => Self::Java,
            "cs" => Self::CSharp,
            "cpp" | "cc" | "cxx" | "hpp" | "h" => Self::Cpp,
            "rs" => Self::Rust,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Go => "go",
            Self::Python => "python",
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Java => "java",
            Self::CSharp => "csharp",
            Self::Cpp => "cpp",
            Self::Rust => "rust",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A file or directory entry produced by the walker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Canonical project-relative path with forward slashes.
    pub path: String,
    /// Absolute path on disk, if known.
    #[serde(default)]
    pub absolute_path: Option<String>,
    /// Whether this entry is a directory.
    #[serde(default)]
    pub is_directory: bool,
}

impl ProjectFile {
    /// Creates a file entry from a project-relative path.
    #[must_use]
    pub fn new(path: impl AsRef<str>) -> Self {
        Self {
            path: to_slash(path.as_ref()),
            absolute_path: None,
            is_directory: false,
        }
    }

    /// Creates a directory entry.
    #[must_use]
    pub fn directory(path: impl AsRef<str>) -> Self {
        Self {
            is_directory: true,
            ..Self::new(path)
        }
    }

    /// Sets the absolute path.
    #[must_use]
    pub fn with_absolute_path(mut self, absolute: impl Into<String>) -> Self {
        self.absolute_path = Some(absolute.into());
        self
    }

    /// Language tag derived from the extension.
    #[must_use]
    pub fn language(&self) -> Language {
        Language::from_path(&self.path)
    }
}

/// A raw import statement as extracted by a language parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawImport {
    /// The import specifier exactly as written.
    pub specifier: String,
    /// Parser's guess that the specifier is relative. Advisory only.
    #[serde(default)]
    pub is_relative_hint: bool,
}

impl RawImport {
    /// Creates a raw import, deriving the hint from a leading `.`.
    #[must_use]
    pub fn new(specifier: impl Into<String>) -> Self {
        let specifier = specifier.into();
        let is_relative_hint = specifier.starts_with('.');
        Self {
            specifier,
            is_relative_hint,
        }
    }
}

/// Everything the analyzer needs about a project: the ordered file list and
/// the raw imports of each file.
#[derive(Debug, Clone, Default)]
pub struct ProjectInput {
    /// Walker output, in walk order.
    pub files: Vec<ProjectFile>,
    /// Raw imports keyed by project-relative path.
    pub imports: HashMap<String, Vec<RawImport>>,
}

impl ProjectInput {
    /// Creates an empty input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with its raw import specifiers.
    #[must_use]
    pub fn with_file<I, S>(mut self, path: &str, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let file = ProjectFile::new(path);
        let raw: Vec<RawImport> = imports.into_iter().map(RawImport::new).collect();
        if !raw.is_empty() {
            self.imports.insert(file.path.clone(), raw);
        }
        self.files.push(file);
        self
    }

    /// Adds a file entry without imports.
    pub fn push_file(&mut self, file: ProjectFile) {
        self.files.push(file);
    }

    /// Sets the raw imports of a file.
    pub fn set_imports(&mut self, path: &str, imports: Vec<RawImport>) {
        self.imports.insert(to_slash(path), imports);
    }

    /// Raw imports of a file; empty for unknown or unparseable files.
    #[must_use]
    pub fn imports_of(&self, path: &str) -> &[RawImport] {
        self.imports.get(path).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_from_extension() {
        assert_eq!(Language::from_path("internal/domain/user.go"), Language::Go);
        assert_eq!(Language::from_path("web/app.tsx"), Language::TypeScript);
        assert_eq!(Language::from_path("lib/util.mjs"), Language::JavaScript);
        assert_eq!(Language::from_path("include/a.hpp"), Language::Cpp);
        assert_eq!(Language::from_path("Makefile"), Language::Unknown);
        assert_eq!(Language::from_path("dir.d/README"), Language::Unknown);
    }

    #[test]
    fn project_file_normalises_separators() {
        let f = ProjectFile::new("internal\\domain\\user.go");
        assert_eq!(f.path, "internal/domain/user.go");
        assert_eq!(f.language(), Language::Go);
    }

    #[test]
    fn raw_import_hint_from_leading_dot() {
        assert!(RawImport::new("./util").is_relative_hint);
        assert!(!RawImport::new("github.com/x/y").is_relative_hint);
    }

    #[test]
    fn input_builder_keeps_file_order() {
        let input = ProjectInput::new()
            .with_file("b.go", ["a.go"])
            .with_file("a.go", Vec::<String>::new());
        let paths: Vec<&str> = input.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["b.go", "a.go"]);
        assert_eq!(input.imports_of("b.go").len(), 1);
        assert!(input.imports_of("a.go").is_empty());
    }
}
