//! Tool registry and function declarations

mod builtins;
mod declarations;
mod executors;
mod format;
mod registration;

pub use declarations::FunctionDeclaration;
pub use format::{ResultFormatter, format_listing, format_show, format_status};
pub use registration::{ToolExecutorFn, ToolHandler, ToolRegistration};

use builtins::register_builtin_tools;

use crate::tools::error::FileOpError;
use crate::tools::file_ops::FileOps;
use crate::tools::types::OperationResult;
use anyhow::{Result, anyhow};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Maps operation names to their schema, handler and result formatter.
///
/// Built-in file operations are registered on construction; further tools can be
/// added with [`ToolRegistry::register_tool`] without touching the agent loop.
#[derive(Clone)]
pub struct ToolRegistry {
    file_ops: FileOps,
    tool_registrations: Vec<ToolRegistration>,
    tool_lookup: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new(file_ops: FileOps) -> Self {
        let mut registry = Self {
            file_ops,
            tool_registrations: Vec::new(),
            tool_lookup: HashMap::new(),
        };

        register_builtin_tools(&mut registry);
        registry
    }

    pub fn register_tool(&mut self, registration: ToolRegistration) -> Result<()> {
        if self.tool_lookup.contains_key(registration.name()) {
            return Err(anyhow!(
                "Tool '{}' is already registered",
                registration.name()
            ));
        }

        let index = self.tool_registrations.len();
        self.tool_lookup
            .insert(registration.name().to_string(), index);
        self.tool_registrations.push(registration);
        Ok(())
    }

    pub fn available_tools(&self) -> Vec<String> {
        self.tool_registrations
            .iter()
            .map(|registration| registration.name().to_string())
            .collect()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tool_lookup.contains_key(name)
    }

    pub fn workspace_root(&self) -> &Path {
        self.file_ops.guard().root()
    }

    pub fn file_ops(&self) -> &FileOps {
        &self.file_ops
    }

    /// Declarations for every registered tool, in registration order
    pub fn declarations(&self) -> Vec<FunctionDeclaration> {
        self.tool_registrations
            .iter()
            .map(|registration| registration.declaration().clone())
            .collect()
    }

    fn registration(&self, name: &str) -> Option<&ToolRegistration> {
        self.tool_lookup
            .get(name)
            .and_then(|index| self.tool_registrations.get(*index))
    }

    /// Run a tool by name. Unknown names and bad arguments yield failed results.
    pub async fn execute_tool(&self, name: &str, args: Value) -> OperationResult {
        let Some(registration) = self.registration(name) else {
            debug!(tool = name, "unknown tool requested");
            return OperationResult::failure(
                &FileOpError::UnknownOperation(name.to_string()),
                None,
            );
        };

        if !args.is_object() && !args.is_null() {
            return OperationResult::failure(
                &FileOpError::InvalidArguments {
                    operation: name.to_string(),
                    reason: "arguments must be a JSON object".to_string(),
                },
                None,
            );
        }

        match registration.handler() {
            ToolHandler::RegistryFn(executor) => executor(self, args).await,
            ToolHandler::TraitObject(tool) => tool.execute(args).await,
        }
    }

    /// Text rendering of a result using the tool's formatter
    pub fn format_result(&self, name: &str, result: &OperationResult) -> String {
        match self.registration(name) {
            Some(registration) => (registration.formatter())(result),
            None => format_status(result),
        }
    }
}
