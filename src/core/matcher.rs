// FILE: src/core/matcher.rs
//! The glob engine seam.
//!
//! Patterns are compiled once with `globset` and evaluated with shell
//! semantics: `*` and `?` stay inside a single path segment, `[^..]` and
//! `[!..]` negate a class, `\` escapes the next character, matching is case
//! sensitive and a leading dot is an ordinary character.

use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure of the matcher to evaluate a compiled pattern against a path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("pattern {pattern} cannot be evaluated against non-UTF-8 path {}", .path.display())]
    NonUtf8Path { pattern: String, path: PathBuf },
}

/// Result of evaluating one pattern against one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched,
    NoMatch,
    Error(MatchError),
}

/// Compile a pattern. Doubles as the load-time syntax probe.
pub fn compile(pattern: &str) -> Result<GlobMatcher, globset::Error> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()?;
    Ok(glob.compile_matcher())
}

pub fn evaluate(matcher: &GlobMatcher, path: &Path) -> MatchOutcome {
    let Some(candidate) = path.to_str() else {
        return MatchOutcome::Error(MatchError::NonUtf8Path {
            pattern: matcher.glob().glob().to_string(),
            path: path.to_path_buf(),
        });
    };

    if matcher.is_match(candidate) {
        MatchOutcome::Matched
    } else {
        MatchOutcome::NoMatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(pattern: &str, path: &str) -> MatchOutcome {
        let compiled = compile(pattern).expect("pattern");
        evaluate(&compiled, Path::new(path))
    }

    #[test]
    fn test_star_stays_within_segment() {
        assert_eq!(outcome("/abs/dir/*.log", "/abs/dir/app.log"), MatchOutcome::Matched);
        assert_eq!(outcome("/abs/dir/*.log", "/abs/dir/sub/app.log"), MatchOutcome::NoMatch);
        assert_eq!(outcome("/abs/*", "/abs/dir/app.log"), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_question_mark_and_classes() {
        assert_eq!(outcome("/repo/a?c", "/repo/abc"), MatchOutcome::Matched);
        assert_eq!(outcome("/repo/a?c", "/repo/a/c"), MatchOutcome::NoMatch);
        assert_eq!(outcome("/repo/file[0-9].go", "/repo/file7.go"), MatchOutcome::Matched);
        assert_eq!(outcome("/repo/file[0-9].go", "/repo/fileX.go"), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_case_sensitive_and_dotfiles() {
        assert_eq!(outcome("/repo/*.go", "/repo/MAIN.GO"), MatchOutcome::NoMatch);
        assert_eq!(outcome("/repo/*", "/repo/.hidden"), MatchOutcome::Matched);
    }

    #[test]
    fn test_caret_negates_class() {
        assert_eq!(outcome("/repo/[^a]*.go", "/repo/b.go"), MatchOutcome::Matched);
        assert_eq!(outcome("/repo/[^a]*.go", "/repo/a.go"), MatchOutcome::NoMatch);
        assert_eq!(outcome("/repo/[^a]*.go", "/repo/^x.go"), MatchOutcome::Matched);
        assert_eq!(outcome("/repo/[!a]*.go", "/repo/a.go"), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_backslash_escapes_metacharacter() {
        assert_eq!(outcome(r"/repo/foo\*", "/repo/foo*"), MatchOutcome::Matched);
        assert_eq!(outcome(r"/repo/foo\*", r"/repo/foo\bar"), MatchOutcome::NoMatch);
        assert_eq!(outcome(r"/repo/foo\*", "/repo/foobar"), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_double_star_inside_segment_acts_as_star() {
        assert!(compile("gen/**.go").is_ok());
        assert_eq!(outcome("/repo/gen/**.go", "/repo/gen/api.go"), MatchOutcome::Matched);
    }

    #[test]
    fn test_compile_rejects_unclosed_class() {
        assert!(compile("[invalid").is_err());
        assert!(compile("/repo/[a-z].go").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_is_match_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let compiled = compile("/repo/*").expect("pattern");
        let path = Path::new(OsStr::from_bytes(b"/repo/\xff.go"));
        match evaluate(&compiled, path) {
            MatchOutcome::Error(MatchError::NonUtf8Path { pattern, .. }) => {
                assert_eq!(pattern, "/repo/*");
            }
            other => panic!("expected match error, got {:?}", other),
        }
    }
}
