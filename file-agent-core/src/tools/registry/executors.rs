use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::constants::tools;
use crate::tools::error::FileOpError;
use crate::tools::types::{
    CreateInput, DeleteInput, EditInput, ListInput, OperationResult, ShowInput,
};

use super::ToolRegistry;

/// Decode a tool's arguments, reporting schema mismatches as a failed result
fn parse_args<T: DeserializeOwned>(operation: &str, args: Value) -> Result<T, OperationResult> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|err| {
        let error = FileOpError::InvalidArguments {
            operation: operation.to_string(),
            reason: err.to_string(),
        };
        OperationResult::failure(&error, None)
    })
}

impl ToolRegistry {
    pub(super) fn create_file_executor(&self, args: Value) -> BoxFuture<'_, OperationResult> {
        Box::pin(async move {
            match parse_args::<CreateInput>(tools::CREATE_FILE, args) {
                Ok(input) => self.file_ops.create_file(&input.path, &input.content).await,
                Err(result) => result,
            }
        })
    }

    pub(super) fn edit_file_executor(&self, args: Value) -> BoxFuture<'_, OperationResult> {
        Box::pin(async move {
            match parse_args::<EditInput>(tools::EDIT_FILE, args) {
                Ok(input) => {
                    self.file_ops
                        .edit_file(&input.path, &input.content, input.mode)
                        .await
                }
                Err(result) => result,
            }
        })
    }

    pub(super) fn show_file_executor(&self, args: Value) -> BoxFuture<'_, OperationResult> {
        Box::pin(async move {
            match parse_args::<ShowInput>(tools::SHOW_FILE, args) {
                Ok(input) => self.file_ops.show_file(&input.path).await,
                Err(result) => result,
            }
        })
    }

    pub(super) fn delete_file_executor(&self, args: Value) -> BoxFuture<'_, OperationResult> {
        Box::pin(async move {
            match parse_args::<DeleteInput>(tools::DELETE_FILE, args) {
                Ok(input) => self.file_ops.delete_file(&input.path, input.confirm).await,
                Err(result) => result,
            }
        })
    }

    pub(super) fn list_directory_executor(&self, args: Value) -> BoxFuture<'_, OperationResult> {
        Box::pin(async move {
            match parse_args::<ListInput>(tools::LIST_DIRECTORY, args) {
                Ok(input) => self.file_ops.list_directory(input.path.as_deref()).await,
                Err(result) => result,
            }
        })
    }
}
