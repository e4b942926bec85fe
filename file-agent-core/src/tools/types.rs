//! Common types used across the tool system

use super::error::{FileOpError, FileOpErrorKind};
use serde::{Deserialize, Serialize};

/// Outcome of one file operation, failures included.
///
/// Optional fields are only present for the operations that produce them and are
/// skipped when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
    /// Root-relative path on success, the raw requested path on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FileOpErrorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_written: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_display: Option<String>,
    /// RFC 3339 modification time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<DirEntry>>,
}

impl OperationResult {
    pub fn success(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            path: Some(path.into()),
            error: None,
            bytes_written: None,
            content: None,
            language: None,
            size: None,
            size_display: None,
            modified: None,
            entries: None,
        }
    }

    pub fn failure(error: &FileOpError, path: Option<&str>) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            path: path.map(str::to_string),
            error: Some(error.kind()),
            bytes_written: None,
            content: None,
            language: None,
            size: None,
            size_display: None,
            modified: None,
            entries: None,
        }
    }

    pub fn with_bytes_written(mut self, bytes: u64) -> Self {
        self.bytes_written = Some(bytes);
        self
    }

    pub fn with_content(mut self, content: String, language: &str) -> Self {
        self.content = Some(content);
        self.language = Some(language.to_string());
        self
    }

    pub fn with_size(mut self, size: u64, size_display: String) -> Self {
        self.size = Some(size);
        self.size_display = Some(size_display);
        self
    }

    pub fn with_modified(mut self, modified: Option<String>) -> Self {
        self.modified = modified;
        self
    }

    pub fn with_entries(mut self, entries: Vec<DirEntry>) -> Self {
        self.entries = Some(entries);
        self
    }

    pub fn error_kind(&self) -> Option<FileOpErrorKind> {
        self.error
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Directory,
}

/// One immediate child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_display: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    Replace,
    Append,
}

/// Input structures for the built-in operations
#[derive(Debug, Deserialize)]
pub struct CreateInput {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct EditInput {
    pub path: String,
    pub content: String,
    #[serde(default)]
    pub mode: EditMode,
}

#[derive(Debug, Deserialize)]
pub struct ShowInput {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteInput {
    pub path: String,
    pub confirm: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListInput {
    #[serde(default)]
    pub path: Option<String>,
}
