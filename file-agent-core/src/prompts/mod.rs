pub mod system;

pub use system::{FormatFlags, generate_system_instruction};
