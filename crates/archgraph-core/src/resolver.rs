//! Import resolution: maps a raw import specifier to a known project file.
//!
//! Resolution is intentionally lossy. A package-style specifier resolves to
//! the first known file (in walk order) whose path ends with it, so two files
//! sharing a suffix are ambiguous and the earlier one wins. Specifiers that
//! match nothing are unresolved and contribute no graph edge.

use std::collections::HashSet;

/// Extensions tried, in order, when a relative specifier has none.
pub const SOURCE_EXTENSIONS: &[&str] = &[".go", ".py", ".ts", ".js", ".java", ".cs", ".cpp", ".hpp"];

/// Resolves raw specifiers against an ordered list of known files.
#[derive(Debug)]
pub struct ImportResolver<'a> {
    files: &'a [String],
    index: HashSet<&'a str>,
}

impl<'a> ImportResolver<'a> {
    /// Creates a resolver over the known files, kept in their given order.
    #[must_use]
    pub fn new(files: &'a [String]) -> Self {
        let index = files.iter().map(String::as_str).collect();
        Self { files, index }
    }

    /// Resolves `raw` imported from `source` to a known file path.
    ///
    /// Tried in order, first success wins:
    ///
    /// 1. `raw` is itself a known path
    /// 2. `raw` starts with `.`: joined to the directory of `source`, tried
    ///    verbatim and with each of [`SOURCE_EXTENSIONS`]
    /// 3. otherwise the first known path ending with `raw`
    #[must_use]
    pub fn resolve(&self, raw: &str, source: &str) -> Option<&'a str> {
        if raw.trim().is_empty() {
            return None;
        }

        if let Some(exact) = self.lookup(raw) {
            return Some(exact);
        }

        // Relative specifiers never fall through to suffix matching.
        if raw.starts_with('.') {
            let joined = join_clean(parent_dir(source), raw);
            if let Some(found) = self.lookup(&joined) {
                return Some(found);
            }
            return SOURCE_EXTENSIONS
                .iter()
                .find_map(|ext| self.lookup(&format!("{joined}{ext}")));
        }

        self.files
            .iter()
            .find(|file| file.ends_with(raw))
            .map(String::as_str)
    }

    /// Returns the known files in order.
    #[must_use]
    pub fn files(&self) -> &'a [String] {
        self.files
    }

    fn lookup(&self, candidate: &str) -> Option<&'a str> {
        self.index.get(candidate).copied()
    }
}

/// Convenience wrapper resolving a single specifier.
#[must_use]
pub fn resolve_import(raw: &str, source: &str, known_files: &[String]) -> Option<String> {
    ImportResolver::new(known_files)
        .resolve(raw, source)
        .map(str::to_string)
}

/// Directory portion of a `/`-separated path; empty for a bare file name.
#[must_use]
pub fn parent_dir(path: &str) -> &str {
    path.rfind('/').map_or("", |i| &path[..i])
}

/// Joins `rel` onto `dir` and lexically cleans the result.
///
/// `.` segments and empty segments are dropped, `..` pops the previous
/// segment. Leading `..` segments that climb above a relative root are kept.
#[must_use]
pub fn join_clean(dir: &str, rel: &str) -> String {
    let rooted = dir.starts_with('/') || (dir.is_empty() && rel.starts_with('/'));
    let mut parts: Vec<&str> = Vec::new();

    for segment in dir.split('/').chain(rel.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| (*p).to_string()).collect()
    }

    #[test]
    fn exact_match_wins() {
        let files = known(&["internal/app/x.go", "internal/domain/user.go"]);
        let r = ImportResolver::new(&files);
        assert_eq!(
            r.resolve("internal/domain/user.go", "internal/app/x.go"),
            Some("internal/domain/user.go")
        );
    }

    #[test]
    fn relative_with_extension() {
        let files = known(&["web/src/app.ts", "web/src/util.ts"]);
        let r = ImportResolver::new(&files);
        assert_eq!(r.resolve("./util", "web/src/app.ts"), Some("web/src/util.ts"));
    }

    #[test]
    fn relative_verbatim() {
        let files = known(&["web/src/app.ts", "web/src/util.ts"]);
        let r = ImportResolver::new(&files);
        assert_eq!(r.resolve("./util.ts", "web/src/app.ts"), Some("web/src/util.ts"));
    }

    #[test]
    fn relative_parent_directory() {
        let files = known(&["a/b/x.go", "a/c.go"]);
        let r = ImportResolver::new(&files);
        assert_eq!(r.resolve("../c", "a/b/x.go"), Some("a/c.go"));
    }

    #[test]
    fn extension_order_is_fixed() {
        let files = known(&["pkg/util.py", "pkg/util.go", "pkg/main.go"]);
        let r = ImportResolver::new(&files);
        // .go is tried before .py regardless of file order.
        assert_eq!(r.resolve("./util", "pkg/main.go"), Some("pkg/util.go"));
    }

    #[test]
    fn unresolved_relative_returns_none() {
        let files = known(&["pkg/main.go"]);
        let r = ImportResolver::new(&files);
        assert_eq!(r.resolve("./missing", "pkg/main.go"), None);
    }

    #[test]
    fn failed_relative_does_not_bind_by_suffix() {
        let files = known(&["web/src/app.ts", "web/lib/util.ts"]);
        let r = ImportResolver::new(&files);
        assert_eq!(r.resolve("./util", "web/src/app.ts"), None);
        assert_eq!(r.resolve("../lib/util", "web/src/app.ts"), Some("web/lib/util.ts"));
    }

    #[test]
    fn suffix_match_takes_first_in_order() {
        let files = known(&["svc/a/models/user.go", "svc/b/models/user.go", "cmd/main.go"]);
        let r = ImportResolver::new(&files);
        assert_eq!(
            r.resolve("models/user.go", "cmd/main.go"),
            Some("svc/a/models/user.go")
        );
    }

    #[test]
    fn suffix_match_is_not_segment_aware() {
        let files = known(&["lib/xuser.go"]);
        let r = ImportResolver::new(&files);
        assert_eq!(r.resolve("user.go", "cmd/main.go"), Some("lib/xuser.go"));
    }

    #[test]
    fn external_package_unresolved() {
        let files = known(&["cmd/main.go"]);
        let r = ImportResolver::new(&files);
        assert_eq!(r.resolve("github.com/spf13/cobra", "cmd/main.go"), None);
    }

    #[test]
    fn empty_specifier_unresolved() {
        let files = known(&["cmd/main.go"]);
        let r = ImportResolver::new(&files);
        assert_eq!(r.resolve("", "cmd/main.go"), None);
        assert_eq!(r.resolve("   ", "cmd/main.go"), None);
    }

    #[test]
    fn free_function_resolves() {
        let files = known(&["a/c.go"]);
        assert_eq!(resolve_import("../c", "a/b/x.go", &files).as_deref(), Some("a/c.go"));
    }

    #[test]
    fn join_clean_cases() {
        assert_eq!(join_clean("a/b", "./c"), "a/b/c");
        assert_eq!(join_clean("a/b", "../c"), "a/c");
        assert_eq!(join_clean("a", "../../c"), "../c");
        assert_eq!(join_clean("", "./c"), "c");
        assert_eq!(join_clean("a", ".."), ".");
        assert_eq!(join_clean("/a", "../../c"), "/c");
        assert_eq!(join_clean("a//b", "./c/"), "a/b/c");
    }

    #[test]
    fn parent_dir_cases() {
        assert_eq!(parent_dir("a/b/c.go"), "a/b");
        assert_eq!(parent_dir("c.go"), "");
    }
}
