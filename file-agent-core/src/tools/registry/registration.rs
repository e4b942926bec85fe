use super::ToolRegistry;
use super::declarations::FunctionDeclaration;
use super::format::{ResultFormatter, format_status};
use crate::tools::traits::Tool;
use crate::tools::types::OperationResult;
use futures::future::BoxFuture;
use serde_json::Value;
use std::sync::Arc;

pub type ToolExecutorFn = for<'a> fn(&'a ToolRegistry, Value) -> BoxFuture<'a, OperationResult>;

#[derive(Clone)]
pub enum ToolHandler {
    RegistryFn(ToolExecutorFn),
    TraitObject(Arc<dyn Tool>),
}

#[derive(Clone)]
pub struct ToolRegistration {
    declaration: FunctionDeclaration,
    handler: ToolHandler,
    formatter: ResultFormatter,
}

impl ToolRegistration {
    pub fn new(declaration: FunctionDeclaration, executor: ToolExecutorFn) -> Self {
        Self {
            declaration,
            handler: ToolHandler::RegistryFn(executor),
            formatter: format_status,
        }
    }

    pub fn from_tool(tool: Arc<dyn Tool>) -> Self {
        let declaration = FunctionDeclaration::new(
            tool.name(),
            tool.description(),
            tool.parameters(),
        );
        Self {
            declaration,
            handler: ToolHandler::TraitObject(tool),
            formatter: format_status,
        }
    }

    pub fn from_tool_instance<T>(tool: T) -> Self
    where
        T: Tool + 'static,
    {
        Self::from_tool(Arc::new(tool))
    }

    pub fn with_formatter(mut self, formatter: ResultFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn name(&self) -> &str {
        &self.declaration.name
    }

    pub fn declaration(&self) -> &FunctionDeclaration {
        &self.declaration
    }

    pub fn handler(&self) -> ToolHandler {
        self.handler.clone()
    }

    pub fn formatter(&self) -> ResultFormatter {
        self.formatter
    }
}
