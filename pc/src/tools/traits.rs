//! Tool trait definition

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::context::ToolContext;
use crate::catalog::CatalogError;

/// A catalog operation exposed to tool-calling clients
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches the client's tool call name)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool
    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult;
}

/// Advertised shape of a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Result of a tool execution
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(content: impl Into<String>) -> Self {
        debug!("ToolResult::success: called");
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    /// Create an error result
    pub fn error(content: impl Into<String>) -> Self {
        debug!("ToolResult::error: called");
        Self {
            content: content.into(),
            is_error: true,
        }
    }

    /// Pretty JSON on success, an error message otherwise
    pub fn from_result<T: Serialize>(result: Result<T, CatalogError>) -> Self {
        match result {
            Ok(value) => match serde_json::to_string_pretty(&value) {
                Ok(json) => Self::success(json),
                Err(e) => Self::error(format!("Failed to serialize result: {}", e)),
            },
            Err(e) => Self::error(format!("Error: {}", e)),
        }
    }
}
