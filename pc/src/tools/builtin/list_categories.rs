//! list_categories tool

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolResult};

pub struct ListCategoriesTool;

#[async_trait]
impl Tool for ListCategoriesTool {
    fn name(&self) -> &'static str {
        "list_categories"
    }

    fn description(&self) -> &'static str {
        "List every prompt category with its description, icon, prompt count and subcategories."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _input: Value, ctx: &ToolContext) -> ToolResult {
        debug!("ListCategoriesTool::execute: called");
        let result = ctx.catalog.list_categories().await.map(|categories| {
            json!({
                "count": categories.len(),
                "categories": categories,
            })
        });
        ToolResult::from_result(result)
    }
}
