//! get_prompt tool - exact lookup by id

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolResult, args};

pub struct GetPromptTool;

#[async_trait]
impl Tool for GetPromptTool {
    fn name(&self) -> &'static str {
        "get_prompt"
    }

    fn description(&self) -> &'static str {
        "Get one prompt, including its full text, by numeric id."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "integer",
                    "description": "Prompt id"
                }
            },
            "required": ["id"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!(?input, "GetPromptTool::execute: called");
        let id = match args::required_id(&input, "id") {
            Ok(id) => id,
            Err(e) => return ToolResult::error(format!("Error: {}", e)),
        };
        ToolResult::from_result(ctx.catalog.get_prompt(id).await)
    }
}
