//! Text renderings of operation results, as fed back to the reasoning engine

use crate::tools::types::{EntryKind, OperationResult};

pub type ResultFormatter = fn(&OperationResult) -> String;

fn error_text(result: &OperationResult) -> String {
    format!("Error: {}", result.message)
}

/// The result message, or `Error: <message>` on failure
pub fn format_status(result: &OperationResult) -> String {
    if result.success {
        result.message.clone()
    } else {
        error_text(result)
    }
}

pub fn format_show(result: &OperationResult) -> String {
    if !result.success {
        return error_text(result);
    }
    format!(
        "File contents of {}:\n\n{}",
        result.path.as_deref().unwrap_or_default(),
        result.content.as_deref().unwrap_or_default()
    )
}

pub fn format_listing(result: &OperationResult) -> String {
    if !result.success {
        return error_text(result);
    }

    let path = result.path.as_deref().unwrap_or(".");
    let entries = result.entries.as_deref().unwrap_or_default();
    if entries.is_empty() {
        return format!("Directory {path} is empty.");
    }

    let mut lines = vec![format!("Contents of {path}:")];
    for entry in entries {
        match entry.kind {
            EntryKind::File => lines.push(format!(
                "  📄 {} ({})",
                entry.name,
                entry.size_display.as_deref().unwrap_or("?")
            )),
            EntryKind::Directory => lines.push(format!("  📁 {}/", entry.name)),
        }
    }
    lines.join("\n")
}
