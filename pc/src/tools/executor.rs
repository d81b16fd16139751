//! ToolExecutor - routes named tool calls to catalog tools

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::builtin::{
    GetPackTool, GetPromptTool, GetRandomPromptsTool, ListCategoriesTool, ListPacksTool, ListPersonasTool,
    ListTagsTool, SearchPromptsTool,
};
use super::{Tool, ToolContext, ToolDefinition, ToolResult};

/// A named tool invocation with its JSON arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub input: Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, input: Value) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }
}

/// Registry of the tools a client may call
pub struct ToolExecutor {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolExecutor {
    /// Create executor with every catalog tool
    pub fn standard() -> Self {
        debug!("ToolExecutor::standard: called");
        let mut executor = Self::empty();
        executor.add_tool(Box::new(SearchPromptsTool));
        executor.add_tool(Box::new(GetPromptTool));
        executor.add_tool(Box::new(ListCategoriesTool));
        executor.add_tool(Box::new(ListPacksTool));
        executor.add_tool(Box::new(GetPackTool));
        executor.add_tool(Box::new(ListTagsTool));
        executor.add_tool(Box::new(ListPersonasTool));
        executor.add_tool(Box::new(GetRandomPromptsTool));
        executor
    }

    /// Create an empty executor (for testing)
    pub fn empty() -> Self {
        debug!("ToolExecutor::empty: called");
        Self { tools: HashMap::new() }
    }

    /// Add a tool, replacing any tool with the same name
    pub fn add_tool(&mut self, tool: Box<dyn Tool>) {
        debug!(tool_name = %tool.name(), "ToolExecutor::add_tool: called");
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Tool definitions, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        debug!("ToolExecutor::definitions: called");
        let mut definitions: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Execute a tool call
    pub async fn execute(&self, tool_call: &ToolCall, ctx: &ToolContext) -> ToolResult {
        debug!(tool_name = %tool_call.name, "ToolExecutor::execute: called");
        match self.tools.get(&tool_call.name) {
            Some(tool) => {
                debug!("ToolExecutor::execute: tool found, executing");
                tool.execute(tool_call.input.clone(), ctx).await
            }
            None => {
                debug!("ToolExecutor::execute: unknown tool");
                ToolResult::error(format!("Unknown tool: {}", tool_call.name))
            }
        }
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool names, sorted
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;

    use crate::catalog::{Catalog, DocumentCache};
    use crate::source::client::mock::MockDataSource;
    use crate::source::{Document, Endpoint, Pack, Persona, Prompt, RecordId, Tag};

    fn prompt(id: u64, title: &str, subcategory: &str, pack: &str) -> Prompt {
        Prompt {
            id,
            title: title.to_string(),
            prompt: format!("Body of {}", title),
            use_case: String::new(),
            category: "Sales".to_string(),
            subcategory: subcategory.to_string(),
            pack_title: pack.to_string(),
            tags: vec!["email".to_string()],
            personas: vec!["Account Executive".to_string()],
        }
    }

    fn setup() -> (Arc<MockDataSource>, ToolContext) {
        let source = Arc::new(MockDataSource::new(vec![
            Document::Prompts(vec![
                prompt(1, "Cold email opener", "Prospecting", "Outbound Pack"),
                prompt(2, "Follow-up email", "Prospecting", "Outbound Pack"),
                prompt(3, "Renewal reminder", "Retention", "Outbound Pack"),
            ]),
            Document::Categories(vec![]),
            Document::Packs(vec![Pack {
                id: RecordId::Int(1),
                title: "Outbound Pack".to_string(),
                category: "Sales".to_string(),
                description: String::new(),
                total_prompts: 3,
                sections: Value::Null,
            }]),
            Document::Tags(vec![Tag {
                name: "email".to_string(),
                count: 3,
            }]),
            Document::Personas(vec![Persona {
                name: "Account Executive".to_string(),
                count: 3,
            }]),
        ]));
        let catalog = Catalog::new(DocumentCache::new(source.clone(), Duration::from_secs(300)));
        (source, ToolContext::new(Arc::new(catalog)))
    }

    async fn call(ctx: &ToolContext, name: &str, input: Value) -> ToolResult {
        ToolExecutor::standard().execute(&ToolCall::new(name, input), ctx).await
    }

    #[test]
    fn test_standard_executor_has_catalog_tools() {
        let executor = ToolExecutor::standard();
        assert_eq!(
            executor.tool_names(),
            vec![
                "get_pack",
                "get_prompt",
                "get_random_prompts",
                "list_categories",
                "list_packs",
                "list_personas",
                "list_tags",
                "search_prompts",
            ]
        );
    }

    #[test]
    fn test_definitions_sorted_with_object_schemas() {
        let definitions = ToolExecutor::standard().definitions();
        assert_eq!(definitions.len(), 8);
        assert_eq!(definitions[0].name, "get_pack");
        for def in &definitions {
            assert_eq!(def.input_schema["type"], "object");
            assert!(!def.description.is_empty());
        }

        let get_prompt = definitions.iter().find(|d| d.name == "get_prompt").unwrap();
        assert_eq!(get_prompt.input_schema["required"], json!(["id"]));
    }

    #[test]
    fn test_empty_executor() {
        let executor = ToolExecutor::empty();
        assert!(!executor.has_tool("search_prompts"));
        assert!(executor.definitions().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let (source, ctx) = setup();
        let result = call(&ctx, "delete_prompt", json!({})).await;
        assert!(result.is_error);
        assert_eq!(result.content, "Unknown tool: delete_prompt");
        assert_eq!(source.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_search_prompts_returns_count_and_prompts() {
        let (_source, ctx) = setup();
        let result = call(&ctx, "search_prompts", json!({"query": "email", "limit": 1})).await;
        assert!(!result.is_error, "{}", result.content);

        let value: Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["prompts"][0]["id"], 1);
    }

    #[tokio::test]
    async fn test_get_prompt_requires_id_without_fetching() {
        let (source, ctx) = setup();
        let result = call(&ctx, "get_prompt", json!({})).await;
        assert!(result.is_error);
        assert_eq!(result.content, "Error: Invalid argument: id is required");
        assert_eq!(source.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_get_prompt_not_found() {
        let (_source, ctx) = setup();
        let result = call(&ctx, "get_prompt", json!({"id": 999999})).await;
        assert!(result.is_error);
        assert_eq!(result.content, "Error: Prompt not found: 999999");
    }

    #[tokio::test]
    async fn test_get_pack_groups_by_subcategory() {
        let (_source, ctx) = setup();
        let result = call(&ctx, "get_pack", json!({"pack_title": "outbound"})).await;
        assert!(!result.is_error, "{}", result.content);

        let value: Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(value["pack_title"], "Outbound Pack");
        assert_eq!(value["total_prompts"], 3);
        assert_eq!(value["sections"][0]["name"], "Prospecting");
        assert_eq!(value["sections"][0]["count"], 2);
        assert_eq!(value["sections"][1]["name"], "Retention");
    }

    #[tokio::test]
    async fn test_list_tools_wrap_count() {
        let (_source, ctx) = setup();
        for (tool, key) in [
            ("list_tags", "tags"),
            ("list_personas", "personas"),
            ("list_packs", "packs"),
            ("list_categories", "categories"),
        ] {
            let result = call(&ctx, tool, json!({})).await;
            assert!(!result.is_error, "{}: {}", tool, result.content);
            let value: Value = serde_json::from_str(&result.content).unwrap();
            assert_eq!(value["count"], value[key].as_array().unwrap().len());
        }
    }

    #[tokio::test]
    async fn test_invalid_limit_type_is_rejected_before_fetch() {
        let (source, ctx) = setup();
        let result = call(&ctx, "list_tags", json!({"limit": "many"})).await;
        assert!(result.is_error);
        assert!(result.content.contains("limit must be a non-negative integer"));
        assert_eq!(source.call_count(Endpoint::Tags), 0);
    }

    #[tokio::test]
    async fn test_random_prompts_never_repeat() {
        let (_source, ctx) = setup();
        let result = call(&ctx, "get_random_prompts", json!({"count": 10})).await;
        assert!(!result.is_error, "{}", result.content);

        let value: Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(value["count"], 3);
        let mut ids: Vec<u64> = value["prompts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_u64().unwrap())
            .collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_source_failure_is_error_result() {
        let (source, ctx) = setup();
        source.set_failing(true);
        let result = call(&ctx, "list_categories", json!({})).await;
        assert!(result.is_error);
        assert!(result.content.starts_with("Error: HTTP 503"));
    }
}
