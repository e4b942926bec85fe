//! CLI argument parsing

use clap::{Args, Parser, Subcommand};
use file_agent_core::prompts::FormatFlags;
use std::path::PathBuf;

/// Main CLI structure for file-agent
#[derive(Parser, Debug)]
#[command(
    name = "file-agent",
    version,
    about = "AI-powered CLI for creating, editing, showing and listing files"
)]
pub struct Cli {
    /// Directory every file operation is confined to; defaults to current directory
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Configuration file path; defaults to file-agent.toml in the workspace
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Model ID, overrides OPENAI_MODEL and the configuration file
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Maximum operation round-trips per request
    #[arg(long, global = true)]
    pub max_round_trips: Option<usize>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new file from a natural-language description
    Create {
        /// What the file should contain, e.g. "study notes on photosynthesis"
        prompt: String,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Edit an existing file with a natural-language instruction
    Edit {
        /// File to edit, relative to the workspace
        file_path: String,

        /// What to change, e.g. "add a summary section"
        prompt: String,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Display a file with syntax highlighting
    Show {
        /// File to display, relative to the workspace
        file_path: String,
    },

    /// Ask the agent anything; it decides which file operations to run
    Chat {
        /// Natural-language message for the agent
        message: String,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// List directory contents
    List {
        /// Directory to list; defaults to the workspace root
        path: Option<String>,
    },
}

/// Output-format flags shared by the engine-backed commands
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct FormatArgs {
    /// Create ultra-concise summaries
    #[arg(long)]
    pub brief: bool,

    /// Provide comprehensive breakdowns
    #[arg(long)]
    pub detailed: bool,

    /// Simplify for novice learners
    #[arg(long)]
    pub beginner: bool,

    /// Include sophisticated analysis
    #[arg(long)]
    pub advanced: bool,

    /// Focus on generating test questions
    #[arg(long)]
    pub questions: bool,

    /// Format as Q&A pairs
    #[arg(long)]
    pub flashcards: bool,

    /// Use Cornell note-taking format
    #[arg(long)]
    pub cornell: bool,

    /// Create text-based concept hierarchies
    #[arg(long)]
    pub mindmap: bool,
}

impl From<FormatArgs> for FormatFlags {
    fn from(args: FormatArgs) -> Self {
        Self {
            brief: args.brief,
            detailed: args.detailed,
            beginner: args.beginner,
            advanced: args.advanced,
            questions: args.questions,
            flashcards: args.flashcards,
            cornell: args.cornell,
            mindmap: args.mindmap,
        }
    }
}
