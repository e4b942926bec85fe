//! File operations and the tool layer the agent loop dispatches through.
//!
//! Every path goes through [`PathGuard`] before the filesystem is touched, and
//! every operation reports its outcome as an [`OperationResult`] value.

pub mod error;
pub mod file_ops;
pub mod path_guard;
pub mod registry;
pub mod traits;
pub mod types;

pub use error::{FileOpError, FileOpErrorKind};
pub use file_ops::FileOps;
pub use path_guard::{PathGuard, ResolvedPath};
pub use registry::{FunctionDeclaration, ToolRegistration, ToolRegistry};
pub use traits::Tool;
pub use types::{DirEntry, EditMode, EntryKind, OperationResult};
