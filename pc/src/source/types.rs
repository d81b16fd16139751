//! Catalog record types and document decoding

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::SourceError;

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One of the five documents served by the catalog API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Prompts,
    Categories,
    Packs,
    Tags,
    Personas,
}

impl Endpoint {
    /// Every endpoint, in slot order
    pub const ALL: [Endpoint; 5] = [
        Endpoint::Prompts,
        Endpoint::Categories,
        Endpoint::Packs,
        Endpoint::Tags,
        Endpoint::Personas,
    ];

    /// Logical name, also the top-level key of the document body
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Prompts => "prompts",
            Endpoint::Categories => "categories",
            Endpoint::Packs => "packs",
            Endpoint::Tags => "tags",
            Endpoint::Personas => "personas",
        }
    }

    /// Position of this endpoint in `ALL`
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier for categories and packs; upstream uses both numbers and slugs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Text(String::new())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// A single reusable prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prompt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub use_case: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subcategory: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pack_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub personas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
    /// Reported by the source, never recomputed
    #[serde(default, deserialize_with = "null_as_default")]
    pub prompt_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subcategories: Vec<String>,
}

/// Named grouping of prompts, joined to prompts by title text only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pack {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_prompts: u64,
    /// Passed through verbatim
    #[serde(default)]
    pub sections: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
}

/// A fully parsed catalog document
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Prompts(Vec<Prompt>),
    Categories(Vec<Category>),
    Packs(Vec<Pack>),
    Tags(Vec<Tag>),
    Personas(Vec<Persona>),
}

#[derive(Deserialize)]
struct PromptsBody {
    prompts: Vec<Prompt>,
}

#[derive(Deserialize)]
struct CategoriesBody {
    categories: Vec<Category>,
}

#[derive(Deserialize)]
struct PacksBody {
    packs: Vec<Pack>,
}

#[derive(Deserialize)]
struct TagsBody {
    tags: Vec<Tag>,
}

#[derive(Deserialize)]
struct PersonasBody {
    personas: Vec<Persona>,
}

impl Document {
    /// Decode a response body of the shape `{ "<collection>": [ ... ] }`
    pub fn parse(endpoint: Endpoint, body: &str) -> Result<Self, SourceError> {
        debug!(%endpoint, body_len = body.len(), "Document::parse: called");
        let parse_err = |source| SourceError::Parse { endpoint, source };
        let document = match endpoint {
            Endpoint::Prompts => {
                Document::Prompts(serde_json::from_str::<PromptsBody>(body).map_err(parse_err)?.prompts)
            }
            Endpoint::Categories => {
                Document::Categories(serde_json::from_str::<CategoriesBody>(body).map_err(parse_err)?.categories)
            }
            Endpoint::Packs => Document::Packs(serde_json::from_str::<PacksBody>(body).map_err(parse_err)?.packs),
            Endpoint::Tags => Document::Tags(serde_json::from_str::<TagsBody>(body).map_err(parse_err)?.tags),
            Endpoint::Personas => {
                Document::Personas(serde_json::from_str::<PersonasBody>(body).map_err(parse_err)?.personas)
            }
        };
        Ok(document)
    }

    /// The endpoint this document belongs to
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Document::Prompts(_) => Endpoint::Prompts,
            Document::Categories(_) => Endpoint::Categories,
            Document::Packs(_) => Endpoint::Packs,
            Document::Tags(_) => Endpoint::Tags,
            Document::Personas(_) => Endpoint::Personas,
        }
    }

    /// Number of records in the collection
    pub fn len(&self) -> usize {
        match self {
            Document::Prompts(v) => v.len(),
            Document::Categories(v) => v.len(),
            Document::Packs(v) => v.len(),
            Document::Tags(v) => v.len(),
            Document::Personas(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn prompts(&self) -> Result<&[Prompt], SourceError> {
        match self {
            Document::Prompts(v) => Ok(v),
            other => Err(other.mismatch(Endpoint::Prompts)),
        }
    }

    pub fn categories(&self) -> Result<&[Category], SourceError> {
        match self {
            Document::Categories(v) => Ok(v),
            other => Err(other.mismatch(Endpoint::Categories)),
        }
    }

    pub fn packs(&self) -> Result<&[Pack], SourceError> {
        match self {
            Document::Packs(v) => Ok(v),
            other => Err(other.mismatch(Endpoint::Packs)),
        }
    }

    pub fn tags(&self) -> Result<&[Tag], SourceError> {
        match self {
            Document::Tags(v) => Ok(v),
            other => Err(other.mismatch(Endpoint::Tags)),
        }
    }

    pub fn personas(&self) -> Result<&[Persona], SourceError> {
        match self {
            Document::Personas(v) => Ok(v),
            other => Err(other.mismatch(Endpoint::Personas)),
        }
    }

    fn mismatch(&self, expected: Endpoint) -> SourceError {
        SourceError::WrongDocument {
            expected,
            actual: self.endpoint(),
        }
    }
}
