//! Configuration for file-agent.
//!
//! Sources, lowest precedence first: built-in defaults, `file-agent.toml`,
//! environment variables (optionally seeded from a `.env` file) and finally
//! command-line overrides. The result is one immutable [`AgentConfig`] built at
//! startup and passed by reference to everything that needs it.

pub mod constants;
pub mod dotenv;
pub mod loader;

pub use dotenv::load_dotenv;
pub use loader::{AgentSection, ConfigManager, FileAgentConfig, FilesSection};

use anyhow::{Context, Result, bail};
use constants::env_vars;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Values supplied on the command line; `None` keeps the lower-precedence value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub model: Option<String>,
    pub max_round_trips: Option<usize>,
}

/// Fully resolved, process-wide configuration
#[derive(Clone)]
pub struct AgentConfig {
    /// Root directory every file operation is confined to
    pub workspace: PathBuf,
    pub max_file_size: u64,
    pub model: String,
    pub base_url: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_round_trips: usize,
    pub request_timeout: Duration,
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("workspace", &self.workspace)
            .field("max_file_size", &self.max_file_size)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .field("max_round_trips", &self.max_round_trips)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl AgentConfig {
    /// Build a configuration from file values and the process environment
    pub fn from_environment(file: &FileAgentConfig, workspace: PathBuf) -> Result<Self> {
        Self::from_sources(file, workspace, |key| std::env::var(key).ok())
    }

    /// Build a configuration from file values and an arbitrary variable lookup
    pub fn from_sources<F>(file: &FileAgentConfig, workspace: PathBuf, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let max_file_size = match lookup(env_vars::MAX_FILE_SIZE) {
            Some(raw) => raw.trim().parse::<u64>().with_context(|| {
                format!("{} must be a number of bytes, got '{}'", env_vars::MAX_FILE_SIZE, raw)
            })?,
            None => file.files.max_file_size,
        };

        Ok(Self {
            workspace,
            max_file_size,
            model: lookup(env_vars::OPENAI_MODEL).unwrap_or_else(|| file.agent.model.clone()),
            base_url: lookup(env_vars::OPENAI_BASE_URL)
                .unwrap_or_else(|| file.agent.base_url.clone()),
            api_key: lookup(env_vars::OPENAI_API_KEY),
            temperature: file.agent.temperature,
            max_round_trips: file.agent.max_round_trips,
            request_timeout: Duration::from_secs(file.agent.request_timeout_secs),
        })
    }

    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(model) = &overrides.model {
            self.model = model.clone();
        }
        if let Some(max_round_trips) = overrides.max_round_trips {
            self.max_round_trips = max_round_trips;
        }
        self
    }

    /// Check the invariants every command relies on
    pub fn validate(&self) -> Result<()> {
        if self.max_file_size == 0 {
            bail!("max_file_size must be greater than zero");
        }
        if self.max_round_trips == 0 {
            bail!("max_round_trips must be greater than zero");
        }
        if self.request_timeout.is_zero() {
            bail!("request_timeout_secs must be greater than zero");
        }
        if self.model.trim().is_empty() {
            bail!("model must not be empty");
        }
        Ok(())
    }

    /// API key for commands that talk to the reasoning engine
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) => Ok(key),
            None => bail!(
                "{} is not set. Please set it in your environment or create a .env file with {}=your_key_here",
                env_vars::OPENAI_API_KEY,
                env_vars::OPENAI_API_KEY
            ),
        }
    }
}
