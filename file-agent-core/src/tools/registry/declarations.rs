use crate::config::constants::tools;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Name, description and argument schema advertised to the reasoning engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl FunctionDeclaration {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

pub(super) fn create_file_declaration() -> FunctionDeclaration {
    FunctionDeclaration::new(
        tools::CREATE_FILE,
        "Create a new file with the given content, or overwrite an existing one. Parent directories are created as needed. Paths are relative to the working directory.",
        json!({
            "type": "object",
            "properties": {
                "path": {"type": "string", "description": "Path of the file to create. Example: 'notes/summary.md'"},
                "content": {"type": "string", "description": "Full text content to write"}
            },
            "required": ["path", "content"]
        }),
    )
}

pub(super) fn edit_file_declaration() -> FunctionDeclaration {
    FunctionDeclaration::new(
        tools::EDIT_FILE,
        "Edit an existing file. In 'replace' mode (default) the whole content is replaced; in 'append' mode the content is added to the end of the file exactly as given, so include a leading newline if one is wanted.",
        json!({
            "type": "object",
            "properties": {
                "path": {"type": "string", "description": "Path of the existing file"},
                "content": {"type": "string", "description": "New content, or content to append"},
                "mode": {"type": "string", "enum": ["replace", "append"], "description": "'replace' or 'append'. Default: 'replace'", "default": "replace"}
            },
            "required": ["path", "content"]
        }),
    )
}

pub(super) fn show_file_declaration() -> FunctionDeclaration {
    FunctionDeclaration::new(
        tools::SHOW_FILE,
        "Read and return the text content of a file. Use this before editing a file you have not seen.",
        json!({
            "type": "object",
            "properties": {
                "path": {"type": "string", "description": "Path of the file to read"}
            },
            "required": ["path"]
        }),
    )
}

pub(super) fn delete_file_declaration() -> FunctionDeclaration {
    FunctionDeclaration::new(
        tools::DELETE_FILE,
        "Delete a file. Only call this when the user clearly asked for the deletion, and pass confirm=true; without it the file is left untouched.",
        json!({
            "type": "object",
            "properties": {
                "path": {"type": "string", "description": "Path of the file to delete"},
                "confirm": {"type": "boolean", "description": "Must be true to actually delete the file"}
            },
            "required": ["path", "confirm"]
        }),
    )
}

pub(super) fn list_directory_declaration() -> FunctionDeclaration {
    FunctionDeclaration::new(
        tools::LIST_DIRECTORY,
        "List the immediate files and subdirectories of a directory, with file sizes. Omit the path to list the working directory.",
        json!({
            "type": "object",
            "properties": {
                "path": {"type": "string", "description": "Directory to list. Default: the working directory"}
            },
            "required": []
        }),
    )
}
