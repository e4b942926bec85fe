use crate::config::constants::{config_files, defaults};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk configuration, read from `file-agent.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct FileAgentConfig {
    /// Reasoning engine and loop settings
    #[serde(default)]
    pub agent: AgentSection,

    /// File operation limits
    #[serde(default)]
    pub files: FilesSection,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AgentSection {
    /// Model identifier sent to the chat-completions endpoint
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum reasoning/executing round-trips per invocation
    ///
    /// Bounds runaway tool-calling: once reached, further operation requests are
    /// not executed and the run ends with a "could not complete" answer.
    #[serde(default = "default_max_round_trips")]
    pub max_round_trips: usize,

    /// Upper bound for a single reasoning engine call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            max_round_trips: default_max_round_trips(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FilesSection {
    /// Largest file, in bytes, that may be written or shown
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for FilesSection {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
        }
    }
}

fn default_model() -> String {
    defaults::DEFAULT_MODEL.to_string()
}
fn default_base_url() -> String {
    defaults::DEFAULT_BASE_URL.to_string()
}
fn default_temperature() -> f32 {
    defaults::DEFAULT_TEMPERATURE
}
fn default_max_round_trips() -> usize {
    defaults::DEFAULT_MAX_ROUND_TRIPS
}
fn default_request_timeout_secs() -> u64 {
    defaults::DEFAULT_REQUEST_TIMEOUT_SECS
}
fn default_max_file_size() -> u64 {
    defaults::DEFAULT_MAX_FILE_SIZE
}

/// Configuration manager for locating and parsing the configuration file
pub struct ConfigManager {
    config: FileAgentConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration from a specific workspace
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self> {
        let workspace = workspace.as_ref();

        let config_path = workspace.join(config_files::CONFIG_FILE_NAME);
        if config_path.exists() {
            return Self::load_from_file(&config_path);
        }

        let fallback_path = workspace
            .join(config_files::CONFIG_DIR_NAME)
            .join(config_files::CONFIG_FILE_NAME);
        if fallback_path.exists() {
            return Self::load_from_file(&fallback_path);
        }

        Ok(Self {
            config: FileAgentConfig::default(),
            config_path: None,
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: FileAgentConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
        })
    }

    pub fn config(&self) -> &FileAgentConfig {
        &self.config
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
