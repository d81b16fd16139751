//! get_random_prompts tool - uniform sample without replacement

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::catalog::{CatalogError, DEFAULT_RANDOM_COUNT, MAX_RANDOM_COUNT, RandomQuery};
use crate::tools::{Tool, ToolContext, ToolResult, args};

pub struct GetRandomPromptsTool;

impl GetRandomPromptsTool {
    async fn run(input: &Value, ctx: &ToolContext) -> Result<Value, CatalogError> {
        let query = RandomQuery {
            count: args::optional_count(input, "count")?,
            category: args::optional_str(input, "category")?,
            tag: args::optional_str(input, "tag")?,
        };
        let prompts = ctx.catalog.random_prompts(&query).await?;
        Ok(json!({
            "count": prompts.len(),
            "prompts": prompts,
        }))
    }
}

#[async_trait]
impl Tool for GetRandomPromptsTool {
    fn name(&self) -> &'static str {
        "get_random_prompts"
    }

    fn description(&self) -> &'static str {
        "Pick random prompts for inspiration, optionally within a category or tag. Never repeats a prompt."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "count": {
                    "type": "integer",
                    "description": format!(
                        "How many prompts (default: {}, max: {})",
                        DEFAULT_RANDOM_COUNT, MAX_RANDOM_COUNT
                    ),
                    "default": DEFAULT_RANDOM_COUNT
                },
                "category": {
                    "type": "string",
                    "description": "Category filter (case-insensitive substring)"
                },
                "tag": {
                    "type": "string",
                    "description": "Tag filter"
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!(?input, "GetRandomPromptsTool::execute: called");
        ToolResult::from_result(Self::run(&input, ctx).await)
    }
}
