//! list_packs tool

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::catalog::CatalogError;
use crate::tools::{Tool, ToolContext, ToolResult, args};

pub struct ListPacksTool;

impl ListPacksTool {
    async fn run(input: &Value, ctx: &ToolContext) -> Result<Value, CatalogError> {
        let category = args::optional_str(input, "category")?;
        let packs = ctx.catalog.list_packs(category.as_deref()).await?;
        Ok(json!({
            "count": packs.len(),
            "packs": packs,
        }))
    }
}

#[async_trait]
impl Tool for ListPacksTool {
    fn name(&self) -> &'static str {
        "list_packs"
    }

    fn description(&self) -> &'static str {
        "List prompt packs, optionally only those whose category contains the given text."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "description": "Category filter (case-insensitive substring)"
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!(?input, "ListPacksTool::execute: called");
        ToolResult::from_result(Self::run(&input, ctx).await)
    }
}
