//! The five file operations.
//!
//! Each public method returns an [`OperationResult`]; the `try_*` helpers use
//! `?` on [`FileOpError`] and the public wrapper folds any error into a failed
//! result. Every path goes through the [`PathGuard`] first, and every write is a
//! single `tokio::fs::write` of the final content.

use super::error::FileOpError;
use super::path_guard::{PathGuard, ResolvedPath};
use super::types::{DirEntry, EditMode, EntryKind, OperationResult};
use crate::config::AgentConfig;
use crate::utils::{format_file_size, language_for_path};
use chrono::{DateTime, Utc};
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct FileOps {
    guard: PathGuard,
    max_file_size: u64,
}

impl FileOps {
    pub fn new(root: impl AsRef<Path>, max_file_size: u64) -> Result<Self, FileOpError> {
        Ok(Self {
            guard: PathGuard::new(root)?,
            max_file_size,
        })
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self, FileOpError> {
        Self::new(&config.workspace, config.max_file_size)
    }

    pub fn guard(&self) -> &PathGuard {
        &self.guard
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Create or overwrite a text file, creating parent directories as needed
    pub async fn create_file(&self, path: &str, content: &str) -> OperationResult {
        let result = self.try_create(path, content).await;
        finish("create_file", path, result)
    }

    /// Replace or append to an existing text file
    pub async fn edit_file(&self, path: &str, content: &str, mode: EditMode) -> OperationResult {
        let result = self.try_edit(path, content, mode).await;
        finish("edit_file", path, result)
    }

    /// Read a text file with its language hint and metadata
    pub async fn show_file(&self, path: &str) -> OperationResult {
        let result = self.try_show(path).await;
        finish("show_file", path, result)
    }

    /// Remove a file; nothing happens unless `confirm` is set
    pub async fn delete_file(&self, path: &str, confirm: bool) -> OperationResult {
        let result = self.try_delete(path, confirm).await;
        finish("delete_file", path, result)
    }

    /// List the immediate children of a directory, the root when `path` is `None`
    pub async fn list_directory(&self, path: Option<&str>) -> OperationResult {
        let raw = path.unwrap_or(".");
        let result = self.try_list(raw).await;
        finish("list_directory", raw, result)
    }

    /// Validate `path` on the blocking pool, since the guard walks symlinks with std calls
    async fn resolve(&self, path: &str) -> Result<ResolvedPath, FileOpError> {
        let guard = self.guard.clone();
        let raw = path.to_string();
        off_executor(path, move || guard.validate(&raw)).await
    }

    async fn resolve_child(&self, child: PathBuf, name: &str) -> Result<ResolvedPath, FileOpError> {
        let guard = self.guard.clone();
        let label = name.to_string();
        off_executor(name, move || guard.revalidate(&child, &label)).await
    }

    fn check_size(&self, size: u64) -> Result<(), FileOpError> {
        if size > self.max_file_size {
            return Err(FileOpError::SizeExceeded {
                size,
                limit: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Metadata for an existing regular file
    async fn file_metadata(&self, resolved: &ResolvedPath) -> Result<Metadata, FileOpError> {
        let rel_path = resolved.display_path();
        let metadata = tokio::fs::metadata(resolved)
            .await
            .map_err(|err| FileOpError::io(&rel_path, err))?;
        if !metadata.is_file() {
            return Err(FileOpError::NotAFile(rel_path));
        }
        Ok(metadata)
    }

    async fn try_create(&self, path: &str, content: &str) -> Result<OperationResult, FileOpError> {
        let resolved = self.resolve(path).await?;
        let rel_path = resolved.display_path();
        self.check_size(content.len() as u64)?;

        if tokio::fs::metadata(&resolved)
            .await
            .is_ok_and(|metadata| metadata.is_dir())
        {
            return Err(FileOpError::NotAFile(rel_path));
        }

        if let Some(parent) = resolved.as_path().parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| FileOpError::Io {
                    path: rel_path.clone(),
                    source,
                })?;
        }

        tokio::fs::write(&resolved, content)
            .await
            .map_err(|source| FileOpError::Io {
                path: rel_path.clone(),
                source,
            })?;

        Ok(OperationResult::success(
            format!("File created successfully: {rel_path}"),
            &rel_path,
        )
        .with_bytes_written(content.len() as u64))
    }

    async fn try_edit(
        &self,
        path: &str,
        content: &str,
        mode: EditMode,
    ) -> Result<OperationResult, FileOpError> {
        let resolved = self.resolve(path).await?;
        let rel_path = resolved.display_path();
        let metadata = self.file_metadata(&resolved).await?;

        let updated = match mode {
            EditMode::Replace => {
                self.check_size(content.len() as u64)?;
                content.to_string()
            }
            EditMode::Append => {
                self.check_size(metadata.len() + content.len() as u64)?;
                let bytes = tokio::fs::read(&resolved)
                    .await
                    .map_err(|err| FileOpError::io(&rel_path, err))?;
                let mut existing =
                    String::from_utf8(bytes).map_err(|_| FileOpError::Decode(rel_path.clone()))?;
                // The file may have grown since the metadata call.
                self.check_size(existing.len() as u64 + content.len() as u64)?;
                existing.push_str(content);
                existing
            }
        };

        tokio::fs::write(&resolved, &updated)
            .await
            .map_err(|err| FileOpError::io(&rel_path, err))?;

        Ok(OperationResult::success(
            format!("File edited successfully: {rel_path}"),
            &rel_path,
        )
        .with_bytes_written(updated.len() as u64))
    }

    async fn try_show(&self, path: &str) -> Result<OperationResult, FileOpError> {
        let resolved = self.resolve(path).await?;
        let rel_path = resolved.display_path();
        let metadata = self.file_metadata(&resolved).await?;
        self.check_size(metadata.len())?;

        let bytes = tokio::fs::read(&resolved)
            .await
            .map_err(|err| FileOpError::io(&rel_path, err))?;
        let size = bytes.len() as u64;
        let content = String::from_utf8(bytes).map_err(|_| FileOpError::Decode(rel_path.clone()))?;

        let modified = metadata
            .modified()
            .ok()
            .map(|time| DateTime::<Utc>::from(time).to_rfc3339());

        Ok(
            OperationResult::success("File displayed successfully", &rel_path)
                .with_content(content, language_for_path(resolved.as_path()))
                .with_size(size, format_file_size(size))
                .with_modified(modified),
        )
    }

    async fn try_delete(&self, path: &str, confirm: bool) -> Result<OperationResult, FileOpError> {
        let resolved = self.resolve(path).await?;
        let rel_path = resolved.display_path();
        self.file_metadata(&resolved).await?;

        if !confirm {
            return Err(FileOpError::ConfirmationRequired(rel_path));
        }

        tokio::fs::remove_file(&resolved)
            .await
            .map_err(|err| FileOpError::io(&rel_path, err))?;

        Ok(OperationResult::success(
            format!("File deleted successfully: {rel_path}"),
            &rel_path,
        ))
    }

    async fn try_list(&self, path: &str) -> Result<OperationResult, FileOpError> {
        let resolved = self.resolve(path).await?;
        let rel_path = resolved.display_path();

        let metadata = tokio::fs::metadata(&resolved)
            .await
            .map_err(|err| FileOpError::io(&rel_path, err))?;
        if !metadata.is_dir() {
            return Err(FileOpError::NotADirectory(rel_path));
        }

        let mut reader = tokio::fs::read_dir(&resolved)
            .await
            .map_err(|err| FileOpError::io(&rel_path, err))?;

        let mut entries = Vec::new();
        loop {
            let entry = match reader.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(err) => return Err(FileOpError::io(&rel_path, err)),
            };
            let name = entry.file_name().to_string_lossy().into_owned();

            let child = match self.resolve_child(entry.path(), &name).await {
                Ok(child) => child,
                Err(err) => {
                    warn!(directory = %rel_path, entry = %name, error = %err, "skipping directory entry");
                    continue;
                }
            };

            let child_metadata = match tokio::fs::metadata(&child).await {
                Ok(child_metadata) => child_metadata,
                Err(err) => {
                    warn!(directory = %rel_path, entry = %name, error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };

            entries.push(if child_metadata.is_dir() {
                DirEntry {
                    name,
                    kind: EntryKind::Directory,
                    size: None,
                    size_display: None,
                }
            } else {
                let size = child_metadata.len();
                DirEntry {
                    name,
                    kind: EntryKind::File,
                    size: Some(size),
                    size_display: Some(format_file_size(size)),
                }
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(OperationResult::success(
            format!("Directory listed successfully: {rel_path}"),
            &rel_path,
        )
        .with_entries(entries))
    }
}

async fn off_executor<F>(label: &str, check: F) -> Result<ResolvedPath, FileOpError>
where
    F: FnOnce() -> Result<ResolvedPath, FileOpError> + Send + 'static,
{
    tokio::task::spawn_blocking(check)
        .await
        .map_err(|err| FileOpError::Io {
            path: label.to_string(),
            source: std::io::Error::other(err),
        })?
}

fn finish(
    operation: &str,
    raw_path: &str,
    result: Result<OperationResult, FileOpError>,
) -> OperationResult {
    match result {
        Ok(result) => {
            debug!(operation, path = ?result.path, "file operation succeeded");
            result
        }
        Err(err) => {
            debug!(operation, path = raw_path, error = %err, "file operation failed");
            OperationResult::failure(&err, Some(raw_path))
        }
    }
}
