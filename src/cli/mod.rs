//! Command-line interface module
//!
//! Argument definitions plus one handler per command.

pub mod agent;
pub mod args;
pub mod list;
pub mod show;

pub use agent::{AgentCommand, handle_agent_command};
pub use args::{Cli, Commands};
pub use list::handle_list_command;
pub use show::handle_show_command;

use console::style;

/// Printed when no subcommand is given
pub fn print_welcome() {
    println!(
        "{} - AI-powered CLI for file operations",
        style("File Agent").blue().bold()
    );
    println!(
        "\nUse {} to see available commands.",
        style("file-agent --help").cyan()
    );
    println!("\nExample commands:");
    for example in [
        "file-agent create \"study notes on photosynthesis\" --cornell",
        "file-agent edit notes.md \"add five review questions\"",
        "file-agent show notes.md",
        "file-agent list",
        "file-agent chat \"organize my biology notes into folders\"",
    ] {
        println!("  {}", style(example).cyan());
    }
}
