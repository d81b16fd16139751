//! get_pack tool - a pack's prompts grouped into sections

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolResult, args};

pub struct GetPackTool;

#[async_trait]
impl Tool for GetPackTool {
    fn name(&self) -> &'static str {
        "get_pack"
    }

    fn description(&self) -> &'static str {
        "Get all prompts of a pack grouped by subcategory. The title matches case-insensitively and may be partial."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "pack_title": {
                    "type": "string",
                    "description": "Pack title or part of it"
                }
            },
            "required": ["pack_title"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!(?input, "GetPackTool::execute: called");
        let pack_title = match args::required_str(&input, "pack_title") {
            Ok(t) => t,
            Err(e) => return ToolResult::error(format!("Error: {}", e)),
        };
        ToolResult::from_result(ctx.catalog.get_pack(&pack_title).await)
    }
}
