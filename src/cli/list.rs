//! `list`: print a directory as a table, no engine involved

use anyhow::{Context, Result, bail};
use console::{Alignment, measure_text_width, pad_str, style};
use file_agent_core::config::AgentConfig;
use file_agent_core::tools::{DirEntry, EntryKind, FileOps};
use std::process::ExitCode;

const HEADERS: [&str; 3] = ["Name", "Type", "Size"];
const COLUMN_GAP: &str = "  ";

pub async fn handle_list_command(config: &AgentConfig, path: Option<&str>) -> Result<ExitCode> {
    let file_ops = FileOps::from_config(config).context("Failed to open the workspace")?;
    let result = file_ops.list_directory(path).await;
    if !result.success {
        bail!("{}", result.message);
    }

    let display_path = result.path.as_deref().unwrap_or(".");
    let entries = result.entries.as_deref().unwrap_or_default();
    if entries.is_empty() {
        println!("{} {display_path}", style("Directory is empty:").yellow());
        return Ok(ExitCode::SUCCESS);
    }

    println!();
    print!("{}", render_listing(display_path, entries));
    Ok(ExitCode::SUCCESS)
}

/// Render entries as a three-column table titled with the listed path
pub fn render_listing(path: &str, entries: &[DirEntry]) -> String {
    let rows: Vec<[String; 3]> = entries.iter().map(entry_row).collect();

    let mut widths = HEADERS.map(measure_text_width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(measure_text_width(cell));
        }
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n", style(format!("Contents of {path}")).italic()));

    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .map(|(header, width)| style(pad_str(header, width, Alignment::Left, None)).bold().to_string())
        .collect();
    out.push_str(header.join(COLUMN_GAP).trim_end());
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|width| "─".repeat(*width)).collect();
    out.push_str(&style(rule.join(COLUMN_GAP)).dim().to_string());
    out.push('\n');

    for [name, kind, size] in &rows {
        out.push_str(&format!(
            "{}{COLUMN_GAP}{}{COLUMN_GAP}{}\n",
            style(pad_str(name, widths[0], Alignment::Left, None)).cyan(),
            style(pad_str(kind, widths[1], Alignment::Left, None)).magenta(),
            style(pad_str(size, widths[2], Alignment::Right, None)).green(),
        ));
    }

    out
}

fn entry_row(entry: &DirEntry) -> [String; 3] {
    match entry.kind {
        EntryKind::File => [
            entry.name.clone(),
            "📄 File".to_string(),
            entry
                .size_display
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
        ],
        EntryKind::Directory => [entry.name.clone(), "📁 Directory".to_string(), "-".to_string()],
    }
}
