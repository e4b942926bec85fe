//! Core trait for pluggable tools

use super::types::OperationResult;
use async_trait::async_trait;
use serde_json::Value;

/// A tool that can be registered alongside the built-in file operations
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given arguments; failures are reported in the result
    async fn execute(&self, args: Value) -> OperationResult;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON schema of the arguments object
    fn parameters(&self) -> Value;
}
