//! Query inputs and result shapes for catalog operations

use serde::{Deserialize, Serialize};

use crate::source::Prompt;

/// Arguments for `Catalog::search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub tag: Option<String>,
    pub category: Option<String>,
    pub persona: Option<String>,
    pub limit: Option<usize>,
}

/// Arguments for `Catalog::random_prompts`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RandomQuery {
    pub count: Option<usize>,
    pub category: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub prompts: Vec<Prompt>,
}

/// One subcategory within a pack
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackSection {
    pub name: String,
    pub count: usize,
    pub prompts: Vec<Prompt>,
}

/// Prompts of a pack grouped by subcategory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackView {
    /// Title as spelled by the first matching prompt
    pub pack_title: String,
    pub total_prompts: usize,
    pub sections: Vec<PackSection>,
}

impl PackView {
    /// Group prompts by subcategory, keeping first-seen section order
    pub fn from_prompts(pack_title: String, prompts: Vec<Prompt>) -> Self {
        let total_prompts = prompts.len();
        let mut sections: Vec<PackSection> = Vec::new();

        for prompt in prompts {
            match sections.iter_mut().find(|s| s.name == prompt.subcategory) {
                Some(section) => section.prompts.push(prompt),
                None => sections.push(PackSection {
                    name: prompt.subcategory.clone(),
                    count: 0,
                    prompts: vec![prompt],
                }),
            }
        }
        for section in &mut sections {
            section.count = section.prompts.len();
        }

        Self {
            pack_title,
            total_prompts,
            sections,
        }
    }
}
