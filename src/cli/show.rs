//! `show`: display one file with syntax highlighting, no engine involved

use anyhow::{Context, Result, anyhow, bail};
use console::style;
use file_agent_core::config::AgentConfig;
use file_agent_core::tools::FileOps;
use std::process::ExitCode;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{LinesWithEndings, as_24_bit_terminal_escaped};

const THEME_NAME: &str = "base16-monokai.dark";
const FALLBACK_THEME_NAME: &str = "base16-ocean.dark";
const ANSI_RESET: &str = "\x1b[0m";

pub async fn handle_show_command(config: &AgentConfig, file_path: &str) -> Result<ExitCode> {
    let file_ops = FileOps::from_config(config).context("Failed to open the workspace")?;
    let result = file_ops.show_file(file_path).await;
    if !result.success {
        bail!("{}", result.message);
    }

    let path = result.path.as_deref().unwrap_or(file_path);
    let size = result.size_display.as_deref().unwrap_or("-");
    let content = result.content.as_deref().unwrap_or_default();
    let language = result.language.as_deref().unwrap_or("text");

    println!();
    println!("{} {path}", style("File:").dim());
    println!("{} {size}", style("Size:").dim());
    println!();
    print!("{}", highlight_with_line_numbers(content, language)?);
    Ok(ExitCode::SUCCESS)
}

/// Highlight `content` for a 24-bit terminal, prefixing every line with its number.
///
/// Unknown language hints fall back to plain text.
pub fn highlight_with_line_numbers(content: &str, language: &str) -> Result<String> {
    let syntax_set = SyntaxSet::load_defaults_newlines();
    let theme_set = ThemeSet::load_defaults();
    let theme = theme_set
        .themes
        .get(THEME_NAME)
        .or_else(|| theme_set.themes.get(FALLBACK_THEME_NAME))
        .ok_or_else(|| anyhow!("No syntax highlighting theme available"))?;
    let syntax = syntax_set
        .find_syntax_by_token(language)
        .unwrap_or_else(|| syntax_set.find_syntax_plain_text());

    let mut highlighter = HighlightLines::new(syntax, theme);
    let gutter = content.lines().count().max(1).to_string().len();
    let mut highlighted = String::new();

    for (index, line) in LinesWithEndings::from(content).enumerate() {
        let regions: Vec<(Style, &str)> = highlighter
            .highlight_line(line, &syntax_set)
            .with_context(|| format!("Failed to highlight line {}", index + 1))?;
        let number = format!("{:>gutter$}", index + 1);
        highlighted.push_str(&format!("{} ", style(number).dim()));
        highlighted.push_str(&as_24_bit_terminal_escaped(&regions[..], false));
        highlighted.push_str(ANSI_RESET);
        if !line.ends_with('\n') {
            highlighted.push('\n');
        }
    }

    Ok(highlighted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::strip_ansi_codes;
    use file_agent_core::config::FileAgentConfig;
    use tempfile::TempDir;

    fn workspace_config(temp_dir: &TempDir) -> Result<AgentConfig> {
        AgentConfig::from_sources(
            &FileAgentConfig::default(),
            temp_dir.path().to_path_buf(),
            |_| None,
        )
    }

    #[test]
    fn numbers_every_line() -> Result<()> {
        let highlighted = highlight_with_line_numbers("fn main() {\n    run();\n}", "rust")?;
        let plain = strip_ansi_codes(&highlighted).to_string();
        let lines: Vec<&str> = plain.lines().collect();

        assert_eq!(lines, vec!["1 fn main() {", "2     run();", "3 }"]);
        Ok(())
    }

    #[test]
    fn unknown_language_falls_back_to_plain_text() -> Result<()> {
        let highlighted = highlight_with_line_numbers("just words\n", "klingon")?;
        assert_eq!(strip_ansi_codes(&highlighted).trim_end(), "1 just words");
        Ok(())
    }

    #[test]
    fn gutter_is_right_aligned() -> Result<()> {
        let content = (1..=10).map(|n| format!("line {n}\n")).collect::<String>();
        let plain = strip_ansi_codes(&highlight_with_line_numbers(&content, "text")?).to_string();

        assert!(plain.starts_with(" 1 line 1\n"));
        assert!(plain.ends_with("10 line 10\n"));
        Ok(())
    }

    #[test]
    fn empty_content_renders_nothing() -> Result<()> {
        assert_eq!(highlight_with_line_numbers("", "text")?, "");
        Ok(())
    }

    #[tokio::test]
    async fn shows_files_and_reports_escapes() -> Result<()> {
        let temp_dir = TempDir::new()?;
        std::fs::write(temp_dir.path().join("main.rs"), "fn main() {}\n")?;
        let config = workspace_config(&temp_dir)?;

        assert_eq!(
            handle_show_command(&config, "main.rs").await?,
            ExitCode::SUCCESS
        );

        let escaped = handle_show_command(&config, "../secret.txt").await;
        let message = escaped.err().map(|err| err.to_string());
        assert_eq!(
            message.as_deref(),
            Some("Path ../secret.txt is outside the allowed directory")
        );
        Ok(())
    }
}
