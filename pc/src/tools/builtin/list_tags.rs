//! list_tags tool

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::catalog::{CatalogError, DEFAULT_TAG_LIMIT, MAX_TAG_LIMIT};
use crate::tools::{Tool, ToolContext, ToolResult, args};

pub struct ListTagsTool;

impl ListTagsTool {
    async fn run(input: &Value, ctx: &ToolContext) -> Result<Value, CatalogError> {
        let limit = args::optional_count(input, "limit")?;
        let tags = ctx.catalog.list_tags(limit).await?;
        Ok(json!({
            "count": tags.len(),
            "tags": tags,
        }))
    }
}

#[async_trait]
impl Tool for ListTagsTool {
    fn name(&self) -> &'static str {
        "list_tags"
    }

    fn description(&self) -> &'static str {
        "List tags by number of prompts using them, most used first."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "description": format!("Maximum tags (default: {}, max: {})", DEFAULT_TAG_LIMIT, MAX_TAG_LIMIT),
                    "default": DEFAULT_TAG_LIMIT
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!(?input, "ListTagsTool::execute: called");
        ToolResult::from_result(Self::run(&input, ctx).await)
    }
}
