/// Model ID constants
pub mod models {
    pub mod openai {
        pub const GPT_4O: &str = "gpt-4o";
        pub const DEFAULT_MODEL: &str = GPT_4O;
    }
}

/// Default configuration values
pub mod defaults {
    use super::models;

    pub const DEFAULT_MODEL: &str = models::openai::DEFAULT_MODEL;
    pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
    /// 10 MiB
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10_485_760;
    pub const DEFAULT_MAX_ROUND_TRIPS: usize = 10;
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
}

/// Environment variable names read at startup
pub mod env_vars {
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
    pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
    pub const MAX_FILE_SIZE: &str = "MAX_FILE_SIZE";
}

/// Configuration file locations, relative to the workspace
pub mod config_files {
    pub const CONFIG_FILE_NAME: &str = "file-agent.toml";
    pub const CONFIG_DIR_NAME: &str = ".file-agent";
    pub const DOTENV_FILE_NAME: &str = ".env";
}

/// Tool name constants to avoid hardcoding strings throughout the codebase
pub mod tools {
    pub const CREATE_FILE: &str = "create_file";
    pub const EDIT_FILE: &str = "edit_file";
    pub const SHOW_FILE: &str = "show_file";
    pub const DELETE_FILE: &str = "delete_file";
    pub const LIST_DIRECTORY: &str = "list_directory";
}

/// Message role constants used on the wire
pub mod message_roles {
    pub const SYSTEM: &str = "system";
    pub const USER: &str = "user";
    pub const ASSISTANT: &str = "assistant";
    pub const TOOL: &str = "tool";
}
