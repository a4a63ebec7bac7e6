// FILE: src/core/canonical.rs
//! Canonical (absolute) pattern form.
//!
//! Relative patterns are joined onto a base directory and every pattern is
//! cleaned lexically. The base directory is escaped before joining so any
//! glob metacharacters in it match literally.

use std::io;
use std::path::{Path, PathBuf};

/// Resolve the base directory used for relative patterns.
///
/// `None` reads the process working directory. A relative base is taken
/// relative to the working directory.
pub fn resolve_base_dir(base_dir: Option<&Path>) -> io::Result<PathBuf> {
    match base_dir {
        Some(dir) if dir.is_absolute() => Ok(dir.to_path_buf()),
        Some(dir) => Ok(std::env::current_dir()?.join(dir)),
        None => std::env::current_dir(),
    }
}

/// Turn a raw pattern into its canonical absolute form.
pub fn absolutize(pattern: &str, base_dir: &Path) -> io::Result<String> {
    if pattern.starts_with('/') {
        return Ok(clean(pattern));
    }

    let base = base_dir.to_str().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("base directory is not valid UTF-8: {}", base_dir.display()),
        )
    })?;

    Ok(clean(&format!("{}/{}", escape(base), pattern)))
}

/// Escape a literal path so every character in it matches itself.
pub fn escape(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for c in literal.chars() {
        if matches!(c, '?' | '*' | '[' | ']' | '{' | '}' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Lexical cleanup: drops empty and `.` segments and folds `..` into its parent.
/// `..` directly under the root stays at the root.
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean() {
        assert_eq!(clean("/repo//a/./b"), "/repo/a/b");
        assert_eq!(clean("/repo/a/../b.go"), "/repo/b.go");
        assert_eq!(clean("/../x"), "/x");
        assert_eq!(clean("/repo/"), "/repo");
        assert_eq!(clean("/"), "/");
        assert_eq!(clean("a/../../b"), "../b");
        assert_eq!(clean(""), ".");
    }

    #[test]
    fn test_absolute_pattern_kept() {
        let base = Path::new("/ignored");
        assert_eq!(absolutize("/abs/*.go", base).unwrap(), "/abs/*.go");
        assert_eq!(absolutize("/abs/x/../*.go", base).unwrap(), "/abs/*.go");
    }

    #[test]
    fn test_relative_pattern_joined() {
        let base = Path::new("/repo");
        assert_eq!(
            absolutize("testdata/testdata.go", base).unwrap(),
            "/repo/testdata/testdata.go"
        );
        assert_eq!(absolutize("./*.log", base).unwrap(), "/repo/*.log");
        assert_eq!(absolutize("../sibling/*", base).unwrap(), "/sibling/*");
        assert_eq!(absolutize("", base).unwrap(), "/repo");
    }

    #[test]
    fn test_base_dir_metacharacters_escaped() {
        let base = Path::new("/tmp/[build]");
        assert_eq!(absolutize("out.txt", base).unwrap(), r"/tmp/\[build\]/out.txt");
        assert_eq!(escape(r"/a{b}/c\d"), r"/a\{b\}/c\\d");
    }

    #[test]
    fn test_resolve_base_dir() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve_base_dir(None).unwrap(), cwd);
        assert_eq!(resolve_base_dir(Some(Path::new("/repo"))).unwrap(), PathBuf::from("/repo"));
        assert_eq!(resolve_base_dir(Some(Path::new("sub"))).unwrap(), cwd.join("sub"));
    }
}
