//! Catalog - filter, sort and sample operations over cached documents

use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use super::cache::DocumentCache;
use super::filter::{self, PromptFilter};
use super::{
    CatalogError, DEFAULT_PERSONA_LIMIT, DEFAULT_RANDOM_COUNT, DEFAULT_SEARCH_LIMIT, DEFAULT_TAG_LIMIT,
    MAX_PERSONA_LIMIT, MAX_RANDOM_COUNT, MAX_SEARCH_LIMIT, MAX_TAG_LIMIT, PackView, RandomQuery, SearchQuery,
    SearchResults,
};
use crate::config::Config;
use crate::source::{Category, Document, Endpoint, Pack, Persona, Prompt, SourceError, Tag, create_source};

/// Read-only query surface over the remote prompt catalog
pub struct Catalog {
    cache: DocumentCache,
}

impl Catalog {
    pub fn new(cache: DocumentCache) -> Self {
        Self { cache }
    }

    /// Build an HTTP-backed catalog from configuration
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        debug!("Catalog::from_config: called");
        let source = create_source(&config.api)?;
        Ok(Self::new(DocumentCache::new(source, config.cache.ttl())))
    }

    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    async fn document(&self, endpoint: Endpoint) -> Result<Arc<Document>, CatalogError> {
        Ok(self.cache.get_or_fetch(endpoint).await?)
    }

    /// Filtered prompts in collection order, truncated to the clamped limit
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResults, CatalogError> {
        debug!(?query, "Catalog::search: called");
        let limit = filter::clamp_limit(query.limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT);
        let doc = self.document(Endpoint::Prompts).await?;

        let prompt_filter = PromptFilter {
            query: query.query.as_deref(),
            tag: query.tag.as_deref(),
            category: query.category.as_deref(),
            persona: query.persona.as_deref(),
        };
        let prompts: Vec<Prompt> = prompt_filter
            .apply(doc.prompts()?)
            .into_iter()
            .take(limit)
            .cloned()
            .collect();

        debug!(count = prompts.len(), limit, "Catalog::search: done");
        Ok(SearchResults {
            count: prompts.len(),
            prompts,
        })
    }

    /// Exact lookup by id; absence is an error, not an empty result
    pub async fn get_prompt(&self, id: u64) -> Result<Prompt, CatalogError> {
        debug!(id, "Catalog::get_prompt: called");
        let doc = self.document(Endpoint::Prompts).await?;
        doc.prompts()?
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found("Prompt", id))
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        debug!("Catalog::list_categories: called");
        let doc = self.document(Endpoint::Categories).await?;
        Ok(doc.categories()?.to_vec())
    }

    /// All packs, optionally narrowed by a category substring
    pub async fn list_packs(&self, category: Option<&str>) -> Result<Vec<Pack>, CatalogError> {
        debug!(?category, "Catalog::list_packs: called");
        let doc = self.document(Endpoint::Packs).await?;
        let packs = doc.packs()?;

        Ok(match category.map(str::trim).filter(|c| !c.is_empty()) {
            Some(c) => packs
                .iter()
                .filter(|p| filter::category_matches(&p.category, c))
                .cloned()
                .collect(),
            None => packs.to_vec(),
        })
    }

    /// Prompts whose `pack_title` contains the requested title, grouped by subcategory
    pub async fn get_pack(&self, pack_title: &str) -> Result<PackView, CatalogError> {
        debug!(%pack_title, "Catalog::get_pack: called");
        let requested = pack_title.trim();
        if requested.is_empty() {
            return Err(CatalogError::Validation("pack_title is required".to_string()));
        }

        let doc = self.document(Endpoint::Prompts).await?;
        let matching: Vec<Prompt> = doc
            .prompts()?
            .iter()
            .filter(|p| filter::pack_title_matches(&p.pack_title, requested))
            .cloned()
            .collect();

        let Some(first) = matching.first() else {
            return Err(CatalogError::not_found("Pack", requested));
        };
        let resolved = first.pack_title.clone();

        debug!(%resolved, prompts = matching.len(), "Catalog::get_pack: resolved");
        Ok(PackView::from_prompts(resolved, matching))
    }

    /// Most used tags first
    pub async fn list_tags(&self, limit: Option<usize>) -> Result<Vec<Tag>, CatalogError> {
        debug!(?limit, "Catalog::list_tags: called");
        let limit = filter::clamp_limit(limit, DEFAULT_TAG_LIMIT, MAX_TAG_LIMIT);
        let doc = self.document(Endpoint::Tags).await?;
        Ok(filter::top_by_count(doc.tags()?, limit))
    }

    /// Most common personas first
    pub async fn list_personas(&self, limit: Option<usize>) -> Result<Vec<Persona>, CatalogError> {
        debug!(?limit, "Catalog::list_personas: called");
        let limit = filter::clamp_limit(limit, DEFAULT_PERSONA_LIMIT, MAX_PERSONA_LIMIT);
        let doc = self.document(Endpoint::Personas).await?;
        Ok(filter::top_by_count(doc.personas()?, limit))
    }

    /// Uniform random prompts, without replacement, from the filtered set
    pub async fn random_prompts(&self, query: &RandomQuery) -> Result<Vec<Prompt>, CatalogError> {
        let (candidates, count) = self.random_candidates(query).await?;
        Ok(filter::sample(&candidates, count, &mut rand::rng()))
    }

    /// Same as `random_prompts` with a caller-supplied generator
    pub async fn random_prompts_with<R: Rng + ?Sized + Send>(
        &self,
        query: &RandomQuery,
        rng: &mut R,
    ) -> Result<Vec<Prompt>, CatalogError> {
        let (candidates, count) = self.random_candidates(query).await?;
        Ok(filter::sample(&candidates, count, rng))
    }

    async fn random_candidates(&self, query: &RandomQuery) -> Result<(Vec<Prompt>, usize), CatalogError> {
        debug!(?query, "Catalog::random_candidates: called");
        let count = filter::clamp_limit(query.count, DEFAULT_RANDOM_COUNT, MAX_RANDOM_COUNT);
        let doc = self.document(Endpoint::Prompts).await?;

        let prompt_filter = PromptFilter {
            tag: query.tag.as_deref(),
            category: query.category.as_deref(),
            ..Default::default()
        };
        let candidates = prompt_filter.apply(doc.prompts()?).into_iter().cloned().collect();
        Ok((candidates, count))
    }
}
