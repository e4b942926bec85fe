//! Confinement of every file operation to a single root directory.
//!
//! Paths are resolved the way the kernel would see them: `.` and `..` are folded,
//! symbolic links are followed (dangling ones included), and components that do not
//! exist yet are kept lexically so new files can be created. Only then is the
//! result compared against the root, component by component.

use super::error::FileOpError;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Same bound the kernel uses before reporting `ELOOP`
const MAX_SYMLINK_HOPS: usize = 40;

/// An absolute path that is the root or lies beneath it.
///
/// Only [`PathGuard`] constructs these, and only for the call at hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    absolute: PathBuf,
    relative: PathBuf,
}

impl ResolvedPath {
    pub fn as_path(&self) -> &Path {
        &self.absolute
    }

    /// Location relative to the root; empty for the root itself
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    /// Root-relative form for messages, `.` for the root
    pub fn display_path(&self) -> String {
        if self.relative.as_os_str().is_empty() {
            ".".to_string()
        } else {
            self.relative.to_string_lossy().into_owned()
        }
    }

    pub fn is_root(&self) -> bool {
        self.relative.as_os_str().is_empty()
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.absolute
    }
}

enum ResolveFailure {
    Loop,
    Io(io::Error),
}

#[derive(Debug, Clone)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    /// Build a guard for `root`, which must be an existing directory
    pub fn new(root: impl AsRef<Path>) -> Result<Self, FileOpError> {
        let raw = root.as_ref();
        let raw_label = raw.to_string_lossy().into_owned();
        let root = std::fs::canonicalize(raw).map_err(|err| FileOpError::io(&raw_label, err))?;
        if !root.is_dir() {
            return Err(FileOpError::NotADirectory(raw_label));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate a user- or model-supplied path
    pub fn validate(&self, raw: &str) -> Result<ResolvedPath, FileOpError> {
        if raw.trim().is_empty() {
            return Err(FileOpError::invalid_path(raw, "path must not be empty"));
        }
        if raw.contains('\0') {
            return Err(FileOpError::invalid_path(
                raw.replace('\0', "\\0"),
                "path must not contain NUL bytes",
            ));
        }

        let requested = Path::new(raw);
        let candidate = if requested.is_absolute() {
            requested.to_path_buf()
        } else {
            self.root.join(requested)
        };
        self.confine(&candidate, raw)
    }

    /// Validate a path derived from an earlier result, such as a directory entry.
    ///
    /// `label` is what an error message shows in place of the path.
    pub fn revalidate(&self, candidate: &Path, label: &str) -> Result<ResolvedPath, FileOpError> {
        self.confine(candidate, label)
    }

    fn confine(&self, candidate: &Path, label: &str) -> Result<ResolvedPath, FileOpError> {
        let mut hops = 0;
        let resolved = resolve(candidate, &mut hops).map_err(|failure| match failure {
            ResolveFailure::Loop => {
                FileOpError::invalid_path(label, "too many levels of symbolic links")
            }
            ResolveFailure::Io(err) => FileOpError::io(label, err),
        })?;

        match resolved.strip_prefix(&self.root) {
            Ok(relative) => {
                let relative = relative.to_path_buf();
                Ok(ResolvedPath {
                    absolute: resolved,
                    relative,
                })
            }
            Err(_) => Err(FileOpError::PathEscape(label.to_string())),
        }
    }
}

/// Resolve `path` to an absolute, symlink-free form without requiring it to exist
fn resolve(path: &Path, hops: &mut usize) -> Result<PathBuf, ResolveFailure> {
    let mut resolved = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                let candidate = resolved.join(name);
                match std::fs::symlink_metadata(&candidate) {
                    Ok(metadata) if metadata.file_type().is_symlink() => {
                        *hops += 1;
                        if *hops > MAX_SYMLINK_HOPS {
                            return Err(ResolveFailure::Loop);
                        }
                        let target = std::fs::read_link(&candidate).map_err(ResolveFailure::Io)?;
                        let target = if target.is_absolute() {
                            target
                        } else {
                            resolved.join(target)
                        };
                        resolved = resolve(&target, hops)?;
                    }
                    Ok(_) => resolved = candidate,
                    Err(err)
                        if matches!(
                            err.kind(),
                            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                        ) =>
                    {
                        resolved = candidate;
                    }
                    Err(err) => return Err(ResolveFailure::Io(err)),
                }
            }
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::error::FileOpErrorKind;
    use anyhow::Result;
    use tempfile::TempDir;

    fn guard(temp_dir: &TempDir) -> Result<PathGuard> {
        Ok(PathGuard::new(temp_dir.path())?)
    }

    fn kind_of(result: Result<ResolvedPath, FileOpError>) -> Option<FileOpErrorKind> {
        result.err().map(|err| err.kind())
    }

    #[test]
    fn accepts_root_and_descendants() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let guard = guard(&temp_dir)?;

        let root = guard.validate(".")?;
        assert!(root.is_root());
        assert_eq!(root.display_path(), ".");

        let nested = guard.validate("docs/notes/todo.md")?;
        assert!(nested.as_path().starts_with(guard.root()));
        assert_eq!(nested.display_path(), "docs/notes/todo.md");

        let absolute = guard.root().join("a.txt");
        let resolved = guard.validate(&absolute.to_string_lossy())?;
        assert_eq!(resolved.relative(), Path::new("a.txt"));
        Ok(())
    }

    #[test]
    fn normalizes_dots_and_trailing_slashes() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let guard = guard(&temp_dir)?;

        let resolved = guard.validate("./a/../b/./c/")?;
        assert_eq!(resolved.relative(), Path::new("b/c"));
        assert!(guard.validate("a/..")?.is_root());
        assert!(guard.validate("a.txt/..")?.is_root());
        assert_eq!(guard.validate("sub/")?.display_path(), "sub");

        let root = guard.root().to_path_buf();
        assert!(guard.validate(&format!("{}/", root.display()))?.is_root());
        if let Some(name) = root.file_name() {
            let roundabout = root.join("..").join(name);
            assert!(guard.validate(&roundabout.to_string_lossy())?.is_root());
        }
        Ok(())
    }

    #[test]
    fn rejects_parent_traversal_and_outside_absolutes() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let guard = guard(&temp_dir)?;

        assert_eq!(
            kind_of(guard.validate("../outside.txt")),
            Some(FileOpErrorKind::PathEscape)
        );
        assert_eq!(
            kind_of(guard.validate("a/../../outside.txt")),
            Some(FileOpErrorKind::PathEscape)
        );
        assert_eq!(
            kind_of(guard.validate("/etc/passwd")),
            Some(FileOpErrorKind::PathEscape)
        );
        Ok(())
    }

    #[test]
    fn sibling_with_shared_prefix_is_outside() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().join("root");
        let evil = temp_dir.path().join("root-evil");
        std::fs::create_dir_all(&root)?;
        std::fs::create_dir_all(&evil)?;
        let guard = PathGuard::new(&root)?;

        assert_eq!(
            kind_of(guard.validate("../root-evil/x.txt")),
            Some(FileOpErrorKind::PathEscape)
        );
        let absolute = evil.join("x.txt");
        assert_eq!(
            kind_of(guard.validate(&absolute.to_string_lossy())),
            Some(FileOpErrorKind::PathEscape)
        );
        Ok(())
    }

    #[test]
    fn escape_message_shows_raw_path_only() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let guard = guard(&temp_dir)?;

        let err = match guard.validate("../secret") {
            Ok(_) => anyhow::bail!("escape should be rejected"),
            Err(err) => err,
        };
        let message = err.to_string();
        assert_eq!(message, "Path ../secret is outside the allowed directory");
        assert!(!message.contains(&*guard.root().to_string_lossy()));
        Ok(())
    }

    #[test]
    fn rejects_empty_and_nul_paths() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let guard = guard(&temp_dir)?;

        assert_eq!(kind_of(guard.validate("")), Some(FileOpErrorKind::InvalidPath));
        assert_eq!(kind_of(guard.validate("   ")), Some(FileOpErrorKind::InvalidPath));
        assert_eq!(
            kind_of(guard.validate("a\0b")),
            Some(FileOpErrorKind::InvalidPath)
        );
        Ok(())
    }

    #[test]
    fn root_must_be_an_existing_directory() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let file = temp_dir.path().join("plain.txt");
        std::fs::write(&file, "x")?;

        assert!(PathGuard::new(&file).is_err());
        assert!(PathGuard::new(temp_dir.path().join("missing")).is_err());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_resolved_before_the_boundary_check() -> Result<()> {
        use std::os::unix::fs::symlink;

        let outer = TempDir::new()?;
        let root = outer.path().join("root");
        let outside = outer.path().join("outside");
        std::fs::create_dir_all(root.join("real"))?;
        std::fs::create_dir_all(&outside)?;

        symlink(&outside, root.join("escape"))?;
        symlink(outside.join("not-yet.txt"), root.join("dangling"))?;
        symlink(root.join("real"), root.join("inside"))?;

        let guard = PathGuard::new(&root)?;

        assert_eq!(
            kind_of(guard.validate("escape/file.txt")),
            Some(FileOpErrorKind::PathEscape)
        );
        assert_eq!(
            kind_of(guard.validate("dangling")),
            Some(FileOpErrorKind::PathEscape)
        );

        let inside = guard.validate("inside/new.txt")?;
        assert_eq!(inside.relative(), Path::new("real/new.txt"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn symlink_loops_are_invalid() -> Result<()> {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new()?;
        symlink(temp_dir.path().join("b"), temp_dir.path().join("a"))?;
        symlink(temp_dir.path().join("a"), temp_dir.path().join("b"))?;
        let guard = guard(&temp_dir)?;

        assert_eq!(
            kind_of(guard.validate("a/file.txt")),
            Some(FileOpErrorKind::InvalidPath)
        );
        Ok(())
    }
}
