//! file-agent - natural-language file assistant
//!
//! `create`, `edit` and `chat` go through the reasoning engine and the agent loop;
//! `show` and `list` call the file operations directly.

mod cli;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{AgentCommand, Cli, Commands};
use console::style;
use file_agent_core::config::{AgentConfig, ConfigManager, ConfigOverrides, load_dotenv};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(&args.log_level);

    match run(args).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", style("Error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--log-level`
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(args: Cli) -> Result<ExitCode> {
    let Some(command) = args.command else {
        cli::print_welcome();
        return Ok(ExitCode::SUCCESS);
    };

    let overrides = ConfigOverrides {
        model: args.model,
        max_round_trips: args.max_round_trips,
    };
    let config = load_config(args.workspace, args.config, &overrides)?;

    match command {
        Commands::Create { prompt, format } => {
            let command = AgentCommand::Create { prompt: &prompt };
            cli::handle_agent_command(&config, command, format.into()).await
        }
        Commands::Edit {
            file_path,
            prompt,
            format,
        } => {
            let command = AgentCommand::Edit {
                file_path: &file_path,
                prompt: &prompt,
            };
            cli::handle_agent_command(&config, command, format.into()).await
        }
        Commands::Chat { message, format } => {
            let command = AgentCommand::Chat { message: &message };
            cli::handle_agent_command(&config, command, format.into()).await
        }
        Commands::Show { file_path } => cli::handle_show_command(&config, &file_path).await,
        Commands::List { path } => cli::handle_list_command(&config, path.as_deref()).await,
    }
}

fn load_config(
    workspace: Option<PathBuf>,
    config_path: Option<PathBuf>,
    overrides: &ConfigOverrides,
) -> Result<AgentConfig> {
    let current_dir = std::env::current_dir().context("Failed to determine current directory")?;
    if let Some(path) = load_dotenv(&current_dir) {
        debug!(path = %path.display(), "environment file applied");
    }

    let workspace = workspace.unwrap_or(current_dir);
    let manager = match config_path {
        Some(path) => ConfigManager::load_from_file(&path)?,
        None => ConfigManager::load_from_workspace(&workspace)?,
    };
    if let Some(path) = manager.config_path() {
        debug!(path = %path.display(), "configuration file loaded");
    }

    let config =
        AgentConfig::from_environment(manager.config(), workspace)?.with_overrides(overrides);
    config.validate()?;
    debug!(?config, "resolved configuration");
    Ok(config)
}
