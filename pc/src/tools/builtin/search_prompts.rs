//! search_prompts tool - keyword, tag, category and persona search

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::catalog::{CatalogError, MAX_SEARCH_LIMIT, SearchQuery, SearchResults};
use crate::tools::{Tool, ToolContext, ToolResult, args};

/// Search prompts by free text and optional filters
pub struct SearchPromptsTool;

impl SearchPromptsTool {
    async fn run(input: &Value, ctx: &ToolContext) -> Result<SearchResults, CatalogError> {
        let query = SearchQuery {
            query: args::optional_str(input, "query")?,
            tag: args::optional_str(input, "tag")?,
            category: args::optional_str(input, "category")?,
            persona: args::optional_str(input, "persona")?,
            limit: args::optional_count(input, "limit")?,
        };
        ctx.catalog.search(&query).await
    }
}

#[async_trait]
impl Tool for SearchPromptsTool {
    fn name(&self) -> &'static str {
        "search_prompts"
    }

    fn description(&self) -> &'static str {
        "Search the prompt catalog. The query matches titles, tags, categories, subcategories and pack titles \
         (case-insensitive). Filters combine with AND. Results keep catalog order."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Free-text keyword"
                },
                "tag": {
                    "type": "string",
                    "description": "Only prompts with a matching tag"
                },
                "category": {
                    "type": "string",
                    "description": "Only prompts whose category contains this text"
                },
                "persona": {
                    "type": "string",
                    "description": "Only prompts for a matching persona"
                },
                "limit": {
                    "type": "integer",
                    "description": format!("Maximum results (default: 10, max: {})", MAX_SEARCH_LIMIT),
                    "default": 10
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!(?input, "SearchPromptsTool::execute: called");
        ToolResult::from_result(Self::run(&input, ctx).await)
    }
}
