//! Built-in catalog tools

mod get_pack;
mod get_prompt;
mod get_random_prompts;
mod list_categories;
mod list_packs;
mod list_personas;
mod list_tags;
mod search_prompts;

pub use get_pack::GetPackTool;
pub use get_prompt::GetPromptTool;
pub use get_random_prompts::GetRandomPromptsTool;
pub use list_categories::ListCategoriesTool;
pub use list_packs::ListPacksTool;
pub use list_personas::ListPersonasTool;
pub use list_tags::ListTagsTool;
pub use search_prompts::SearchPromptsTool;
