//! # file-agent-core
//!
//! Core library for `file-agent`, a natural-language assistant that creates,
//! edits, shows, deletes and lists files inside one working directory.
//!
//! - [`tools`]: the path guard, the five file operations and the tool registry
//! - [`agent`]: conversation state and the bounded reasoning/executing loop
//! - [`llm`]: the OpenAI-compatible chat-completions client
//! - [`config`]: TOML, `.env` and environment configuration
//! - [`prompts`]: the system instruction and format flags
//!
//! ```rust,no_run
//! use file_agent_core::agent::{AgentLoop, LlmReasoningEngine};
//! use file_agent_core::config::{AgentConfig, ConfigManager};
//! use file_agent_core::prompts::{FormatFlags, generate_system_instruction};
//! use file_agent_core::tools::{FileOps, ToolRegistry};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let workspace = std::env::current_dir()?;
//! let manager = ConfigManager::load_from_workspace(&workspace)?;
//! let config = AgentConfig::from_environment(manager.config(), workspace)?;
//!
//! let registry = ToolRegistry::new(FileOps::from_config(&config)?);
//! let engine = LlmReasoningEngine::from_config(&config)?;
//! let agent = AgentLoop::from_config(Box::new(engine), registry, &config);
//!
//! let prompt = generate_system_instruction(&FormatFlags::default());
//! let outcome = agent.run(&prompt, "Create a file: summary of chapter 3").await;
//! println!("{}", outcome.answer);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod prompts;
pub mod tools;
pub mod utils;

pub use agent::{AgentLoop, RunOutcome, StopReason};
pub use config::{AgentConfig, ConfigManager};
pub use tools::{FileOps, OperationResult, ToolRegistry};
