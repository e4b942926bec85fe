//! Engine-backed commands: `create`, `edit` and `chat`

use crate::ui::{self, Spinner, render_panel};
use anyhow::{Context, Result};
use console::{Style, style};
use file_agent_core::agent::{AgentLoop, LlmReasoningEngine, RunOutcome};
use file_agent_core::config::AgentConfig;
use file_agent_core::prompts::{FormatFlags, generate_system_instruction};
use file_agent_core::tools::{FileOps, ToolRegistry};
use std::process::ExitCode;
use tracing::info;

/// Conventional exit status for a run interrupted with Ctrl-C
const INTERRUPTED_EXIT_CODE: u8 = 130;

const PANEL_TITLE: &str = "Agent Response";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentCommand<'a> {
    Create { prompt: &'a str },
    Edit { file_path: &'a str, prompt: &'a str },
    Chat { message: &'a str },
}

impl AgentCommand<'_> {
    /// The user utterance sent to the engine
    pub fn utterance(&self) -> String {
        match self {
            Self::Create { prompt } => format!("Create a file: {prompt}"),
            Self::Edit { file_path, prompt } => format!("Edit the file {file_path}: {prompt}"),
            Self::Chat { message } => (*message).to_string(),
        }
    }

    fn progress_message(&self) -> &'static str {
        match self {
            Self::Create { .. } => "Creating file...",
            Self::Edit { .. } => "Editing file...",
            Self::Chat { .. } => "Processing...",
        }
    }

    fn success_banner(&self) -> Option<&'static str> {
        match self {
            Self::Create { .. } => Some("File created successfully!"),
            Self::Edit { .. } => Some("File edited successfully!"),
            Self::Chat { .. } => None,
        }
    }

    fn border_style(&self) -> Style {
        match self {
            Self::Chat { .. } => Style::new().green(),
            _ => Style::new().blue(),
        }
    }
}

/// Run one request through the agent loop and render the outcome.
///
/// Exits with failure when the run stops for any reason other than a final answer.
pub async fn handle_agent_command(
    config: &AgentConfig,
    command: AgentCommand<'_>,
    flags: FormatFlags,
) -> Result<ExitCode> {
    let file_ops = FileOps::from_config(config).context("Failed to open the workspace")?;
    let engine = LlmReasoningEngine::from_config(config)?;
    let agent = AgentLoop::from_config(Box::new(engine), ToolRegistry::new(file_ops), config);

    let system_prompt = generate_system_instruction(&flags);
    let utterance = command.utterance();
    info!(
        model = %config.model,
        workspace = %agent.registry().workspace_root().display(),
        "starting agent run"
    );

    let spinner = Spinner::new(command.progress_message());
    let outcome = tokio::select! {
        outcome = agent.run(&system_prompt, &utterance) => outcome,
        _ = tokio::signal::ctrl_c() => {
            spinner.finish_with_error("Interrupted");
            return Ok(ExitCode::from(INTERRUPTED_EXIT_CODE));
        }
    };
    spinner.finish_and_clear();

    print_operations(&outcome);
    Ok(print_outcome(command, &outcome))
}

fn print_operations(outcome: &RunOutcome) {
    for operation in &outcome.operations {
        let name = style(&operation.request.name).cyan();
        if operation.result.success {
            let target = operation.result.path.as_deref().unwrap_or("-");
            println!("{} {name} {target}", style("✓").green());
        } else {
            println!(
                "{} {name} {}",
                style("✗").red(),
                style(&operation.result.message).red()
            );
        }
    }
}

fn print_outcome(command: AgentCommand<'_>, outcome: &RunOutcome) -> ExitCode {
    let width = ui::panel_width();
    println!();

    if !outcome.is_completed() {
        let border = Style::new().red();
        println!("{}", render_panel(PANEL_TITLE, &outcome.answer, &border, width));
        return ExitCode::FAILURE;
    }

    let changed_files = outcome
        .operations
        .iter()
        .any(|operation| operation.result.success);
    if let Some(banner) = command.success_banner().filter(|_| changed_files) {
        println!("{} {banner}", style("✓").green());
    }
    println!(
        "{}",
        render_panel(PANEL_TITLE, &outcome.answer, &command.border_style(), width)
    );
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utterances_carry_the_command_prefix() {
        assert_eq!(
            AgentCommand::Create {
                prompt: "notes on mitosis"
            }
            .utterance(),
            "Create a file: notes on mitosis"
        );
        assert_eq!(
            AgentCommand::Edit {
                file_path: "notes.md",
                prompt: "add a summary"
            }
            .utterance(),
            "Edit the file notes.md: add a summary"
        );
        assert_eq!(
            AgentCommand::Chat {
                message: "list everything"
            }
            .utterance(),
            "list everything"
        );
    }

    #[test]
    fn only_file_commands_print_a_banner() {
        assert!(AgentCommand::Create { prompt: "x" }.success_banner().is_some());
        assert!(AgentCommand::Chat { message: "x" }.success_banner().is_none());
    }
}
