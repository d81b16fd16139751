//! list_personas tool

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::catalog::{CatalogError, DEFAULT_PERSONA_LIMIT, MAX_PERSONA_LIMIT};
use crate::tools::{Tool, ToolContext, ToolResult, args};

pub struct ListPersonasTool;

impl ListPersonasTool {
    async fn run(input: &Value, ctx: &ToolContext) -> Result<Value, CatalogError> {
        let limit = args::optional_count(input, "limit")?;
        let personas = ctx.catalog.list_personas(limit).await?;
        Ok(json!({
            "count": personas.len(),
            "personas": personas,
        }))
    }
}

#[async_trait]
impl Tool for ListPersonasTool {
    fn name(&self) -> &'static str {
        "list_personas"
    }

    fn description(&self) -> &'static str {
        "List target personas (job roles) by number of prompts, most common first."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "description": format!(
                        "Maximum personas (default: {}, max: {})",
                        DEFAULT_PERSONA_LIMIT, MAX_PERSONA_LIMIT
                    ),
                    "default": DEFAULT_PERSONA_LIMIT
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!(?input, "ListPersonasTool::execute: called");
        ToolResult::from_result(Self::run(&input, ctx).await)
    }
}
