//! Path pattern matching for layer declarations and forbidden dependencies.
//!
//! The dialect is deliberately small. Three shapes are recognised, checked
//! in this order:
//!
//! 1. `prefix/**` matches any path starting with `prefix`
//! 2. `**/suffix` matches any path ending with `suffix` or containing
//!    `/suffix`
//! 3. anything else is a shell glob, tried against the base name first and
//!    then against the full path
//!
//! In the third tier `**` has no recursive meaning and behaves as a single
//! `*`, so `**.go` matches any `.go` base name and `a/**/b.go` needs exactly
//! one segment between `a` and `b.go`. Callers go through [`PathMatcher`] so
//! a fuller engine can be swapped in.

use glob::MatchOptions;

/// Shell-glob options: `*` and `?` never cross a `/`.
const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Matches project-relative paths against layer and forbidden-dependency
/// patterns.
pub trait PathMatcher: Send + Sync {
    /// Tests whether `path` matches `pattern`.
    fn matches(&self, path: &str, pattern: &str) -> bool;
}

/// The default three-tier matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleGlobMatcher;

impl PathMatcher for SimpleGlobMatcher {
    fn matches(&self, path: &str, pattern: &str) -> bool {
        match_path(path, pattern)
    }
}

/// Tests whether `path` matches `pattern` using the three-tier dialect.
///
/// # Examples
///
/// ```
/// use archgraph_core::pattern::match_path;
///
/// assert!(match_path("internal/domain/user.go", "internal/domain/**"));
/// assert!(!match_path("internal/app/x.go", "internal/domain/**"));
/// assert!(match_path("pkg/legacy/foo_test.go", "**/foo_test.go"));
/// ```
#[must_use]
pub fn match_path(path: &str, pattern: &str) -> bool {
    let path = to_slash(path);
    let pattern = to_slash(pattern);

    if let Some(prefix) = pattern.strip_suffix("/**") {
        return path.starts_with(prefix);
    }
    if let Some(suffix) = pattern.strip_prefix("**/") {
        return path.ends_with(suffix) || path.contains(&format!("/{suffix}"));
    }

    let mut pattern = pattern;
    while pattern.contains("**") {
        pattern = pattern.replace("**", "*");
    }
    let Ok(glob) = glob::Pattern::new(&pattern) else {
        return false;
    };
    glob.matches_with(base_name(&path), GLOB_OPTIONS) || glob.matches_with(&path, GLOB_OPTIONS)
}

/// Normalises a path to forward slashes.
#[must_use]
pub fn to_slash(path: &str) -> String {
    path.replace('\\', "/")
}

/// Returns the last `/`-separated segment of a path.
#[must_use]
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_globstar() {
        assert!(match_path("internal/domain/user.go", "internal/domain/**"));
        assert!(match_path("internal/domain/sub/deep.go", "internal/domain/**"));
        assert!(!match_path("internal/app/x.go", "internal/domain/**"));
    }

    #[test]
    fn prefix_globstar_is_plain_prefix() {
        // No segment boundary check after the prefix.
        assert!(match_path("internal/domainx/a.go", "internal/domain/**"));
    }

    #[test]
    fn suffix_globstar() {
        assert!(match_path("pkg/legacy/foo_test.go", "**/foo_test.go"));
        assert!(match_path("foo_test.go", "**/foo_test.go"));
        assert!(match_path("a/vendor/lib/x.go", "**/vendor/lib"));
        assert!(!match_path("pkg/legacy/bar_test.go", "**/foo_test.go"));
    }

    #[test]
    fn suffix_globstar_matches_interior_segment() {
        assert!(match_path("src/generated/types.ts", "**/generated"));
        assert!(match_path("src/generated/types.ts", "**/generated/types.ts"));
    }

    #[test]
    fn glob_matches_base_name() {
        assert!(match_path("internal/domain/user_test.go", "*_test.go"));
        assert!(!match_path("internal/domain/user.go", "*_test.go"));
    }

    #[test]
    fn glob_matches_full_path() {
        assert!(match_path("cmd/main.go", "cmd/*.go"));
        assert!(!match_path("cmd/sub/main.go", "cmd/*.go"));
    }

    #[test]
    fn star_does_not_cross_separator() {
        assert!(!match_path("a/b/c.go", "a/*"));
    }

    #[test]
    fn question_mark_and_class() {
        assert!(match_path("v1.go", "v?.go"));
        assert!(match_path("v2.go", "v[0-9].go"));
        assert!(!match_path("vx.go", "v[0-9].go"));
    }

    #[test]
    fn interior_globstar_is_a_single_star() {
        assert!(match_path("internal/user.go", "**.go"));
        assert!(match_path("src/a.ts", "src/**.ts"));
        assert!(!match_path("src/nested/a.ts", "src/**.ts"));
    }

    #[test]
    fn globstar_between_segments_spans_one_segment() {
        assert!(match_path("a/x/b.go", "a/**/b.go"));
        assert!(!match_path("a/x/y/b.go", "a/**/b.go"));
        assert!(!match_path("a/b.go", "a/**/b.go"));
    }

    #[test]
    fn invalid_glob_never_matches() {
        assert!(!match_path("a[b.go", "a[b.go"));
    }

    #[test]
    fn backslashes_are_normalised() {
        assert!(match_path("internal\\domain\\user.go", "internal/domain/**"));
        assert!(match_path("internal/domain/user.go", "internal\\domain\\**"));
    }

    #[test]
    fn exact_path_matches() {
        assert!(match_path("cmd/main.go", "cmd/main.go"));
        assert!(match_path("cmd/main.go", "main.go"));
    }

    #[test]
    fn trait_delegates_to_match_path() {
        let matcher = SimpleGlobMatcher;
        assert!(matcher.matches("internal/domain/user.go", "internal/domain/**"));
        assert!(!matcher.matches("internal/app/x.go", "internal/domain/**"));
    }
}
