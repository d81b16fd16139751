//! Matching, ordering and sampling over catalog records
//!
//! Records are joined by free text, not identifiers. Every join goes through
//! one of the named matchers below so the matching rule can be tightened in a
//! single place.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::source::{Persona, Prompt, Tag};

/// Case-insensitive containment; `needle` must already be lowercase
fn contains_lower(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Category join: case-insensitive substring
pub fn category_matches(category: &str, filter: &str) -> bool {
    contains_lower(category, &filter.to_lowercase())
}

/// Tag join: case-insensitive exact or substring match against any tag
pub fn tag_matches(tags: &[String], filter: &str) -> bool {
    let filter = filter.to_lowercase();
    tags.iter().any(|t| {
        let t = t.to_lowercase();
        t == filter || t.contains(&filter)
    })
}

/// Persona join: case-insensitive substring against any persona
pub fn persona_matches(personas: &[String], filter: &str) -> bool {
    let filter = filter.to_lowercase();
    personas.iter().any(|p| contains_lower(p, &filter))
}

/// Pack join: case-insensitive substring of the requested title in `pack_title`
pub fn pack_title_matches(pack_title: &str, requested: &str) -> bool {
    contains_lower(pack_title, &requested.to_lowercase())
}

/// Free-text query: title, any tag, category, subcategory or pack title
pub fn query_matches(prompt: &Prompt, query: &str) -> bool {
    let q = query.to_lowercase();
    contains_lower(&prompt.title, &q)
        || prompt.tags.iter().any(|t| contains_lower(t, &q))
        || contains_lower(&prompt.category, &q)
        || contains_lower(&prompt.subcategory, &q)
        || contains_lower(&prompt.pack_title, &q)
}

/// Conjunction of the optional prompt filters
///
/// Applied in fixed order: query, tag, category, persona. Empty strings are
/// treated as absent.
#[derive(Debug, Clone, Default)]
pub struct PromptFilter<'a> {
    pub query: Option<&'a str>,
    pub tag: Option<&'a str>,
    pub category: Option<&'a str>,
    pub persona: Option<&'a str>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl PromptFilter<'_> {
    pub fn matches(&self, prompt: &Prompt) -> bool {
        present(self.query).is_none_or(|q| query_matches(prompt, q))
            && present(self.tag).is_none_or(|t| tag_matches(&prompt.tags, t))
            && present(self.category).is_none_or(|c| category_matches(&prompt.category, c))
            && present(self.persona).is_none_or(|p| persona_matches(&prompt.personas, p))
    }

    /// Matching prompts in collection order
    pub fn apply<'p>(&self, prompts: &'p [Prompt]) -> Vec<&'p Prompt> {
        prompts.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Resolve an optional requested limit into `[1, max]`
pub fn clamp_limit(requested: Option<usize>, default: usize, max: usize) -> usize {
    requested.unwrap_or(default).clamp(1, max)
}

/// Records that carry a source-provided popularity count
pub trait Counted {
    fn count(&self) -> u64;
}

impl Counted for Tag {
    fn count(&self) -> u64 {
        self.count
    }
}

impl Counted for Persona {
    fn count(&self) -> u64 {
        self.count
    }
}

/// Highest count first; ties keep their original relative order
pub fn top_by_count<T: Counted + Clone>(items: &[T], limit: usize) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| b.count().cmp(&a.count()));
    sorted.truncate(limit);
    sorted
}

/// Uniform sample without replacement
///
/// Partial Fisher-Yates: only the first `count` positions are shuffled, each
/// swapped with a uniformly chosen position at or after it.
pub fn sample<T: Clone, R: Rng + ?Sized>(items: &[T], count: usize, rng: &mut R) -> Vec<T> {
    let mut pool = items.to_vec();
    let amount = count.min(pool.len());
    let (chosen, _) = pool.partial_shuffle(rng, amount);
    chosen.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn prompt(id: u64, title: &str, category: &str, tags: &[&str], personas: &[&str]) -> Prompt {
        Prompt {
            id,
            title: title.to_string(),
            prompt: String::new(),
            use_case: String::new(),
            category: category.to_string(),
            subcategory: String::new(),
            pack_title: String::new(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            personas: personas.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_category_matches_case_insensitive_substring() {
        assert!(category_matches("Sales & Marketing", "sales"));
        assert!(category_matches("B2B SALES", "Sales"));
        assert!(!category_matches("Engineering", "sales"));
    }

    #[test]
    fn test_tag_matches_any_tag() {
        let tags = vec!["Cold-Email".to_string(), "outreach".to_string()];
        assert!(tag_matches(&tags, "cold-email"));
        assert!(tag_matches(&tags, "reach"));
        assert!(!tag_matches(&tags, "linkedin"));
        assert!(!tag_matches(&[], "anything"));
    }

    #[test]
    fn test_query_matches_each_field() {
        let mut p = prompt(1, "Quarterly Review", "Management", &["okr"], &[]);
        p.subcategory = "Planning".to_string();
        p.pack_title = "Leadership Pack".to_string();

        assert!(query_matches(&p, "quarterly"));
        assert!(query_matches(&p, "OKR"));
        assert!(query_matches(&p, "manage"));
        assert!(query_matches(&p, "planning"));
        assert!(query_matches(&p, "leadership"));
        assert!(!query_matches(&p, "recruiting"));
    }

    #[test]
    fn test_query_does_not_search_body_or_personas() {
        let mut p = prompt(1, "Title", "Cat", &[], &["Founder"]);
        p.prompt = "secret body text".to_string();
        assert!(!query_matches(&p, "secret"));
        assert!(!query_matches(&p, "founder"));
    }

    #[test]
    fn test_filter_is_conjunctive() {
        let prompts = vec![
            prompt(1, "Cold email", "Sales", &["email"], &["SDR"]),
            prompt(2, "Cold call", "Sales", &["phone"], &["SDR"]),
            prompt(3, "Cold email", "Support", &["email"], &["Agent"]),
        ];

        let filter = PromptFilter {
            query: Some("cold"),
            tag: Some("email"),
            category: Some("sales"),
            persona: Some("sdr"),
        };
        let ids: Vec<u64> = filter.apply(&prompts).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_blank_filters_are_ignored() {
        let prompts = vec![prompt(1, "A", "X", &[], &[]), prompt(2, "B", "Y", &[], &[])];
        let filter = PromptFilter {
            query: Some("  "),
            tag: Some(""),
            ..Default::default()
        };
        assert_eq!(filter.apply(&prompts).len(), 2);
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None, 10, 50), 10);
        assert_eq!(clamp_limit(Some(1000), 10, 50), 50);
        assert_eq!(clamp_limit(Some(0), 10, 50), 1);
        assert_eq!(clamp_limit(Some(25), 10, 50), 25);
    }

    #[test]
    fn test_top_by_count_is_stable() {
        let tags = vec![
            Tag {
                name: "a".to_string(),
                count: 5,
            },
            Tag {
                name: "b".to_string(),
                count: 9,
            },
            Tag {
                name: "c".to_string(),
                count: 9,
            },
        ];
        let names: Vec<String> = top_by_count(&tags, 50).into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["b", "c", "a"]);

        let top = top_by_count(&tags, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "b");
    }

    #[test]
    fn test_sample_returns_all_when_short() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut picked = sample(&[1, 2, 3], 5, &mut rng);
        picked.sort();
        assert_eq!(picked, vec![1, 2, 3]);
    }

    #[test]
    fn test_sample_has_no_duplicates() {
        let mut rng = StdRng::seed_from_u64(11);
        let items: Vec<u32> = (0..20).collect();
        for _ in 0..100 {
            let mut picked = sample(&items, 10, &mut rng);
            assert_eq!(picked.len(), 10);
            picked.sort();
            picked.dedup();
            assert_eq!(picked.len(), 10);
        }
    }

    #[test]
    fn test_sample_is_uniform() {
        // Chi-square against uniform, 9 degrees of freedom; 27.88 is p = 0.001
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let items: Vec<usize> = (0..10).collect();
        let trials = 5000;
        let mut counts = [0usize; 10];
        for _ in 0..trials {
            let picked = sample(&items, 1, &mut rng);
            counts[picked[0]] += 1;
        }

        let expected = trials as f64 / 10.0;
        let chi_square: f64 = counts
            .iter()
            .map(|&c| {
                let diff = c as f64 - expected;
                diff * diff / expected
            })
            .sum();
        assert!(chi_square < 27.88, "chi-square {} with counts {:?}", chi_square, counts);
    }

    proptest! {
        #[test]
        fn prop_clamp_limit_in_range(requested in proptest::option::of(0usize..100_000), max in 1usize..600) {
            let limit = clamp_limit(requested, 10.min(max), max);
            prop_assert!(limit >= 1 && limit <= max);
        }

        #[test]
        fn prop_top_by_count_sorted_and_stable(counts in proptest::collection::vec(0u64..5, 0..40), limit in 1usize..50) {
            let tags: Vec<Tag> = counts
                .iter()
                .enumerate()
                .map(|(i, c)| Tag { name: i.to_string(), count: *c })
                .collect();
            let top = top_by_count(&tags, limit);

            prop_assert_eq!(top.len(), tags.len().min(limit));
            for pair in top.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a.count >= b.count);
                if a.count == b.count {
                    let ia: usize = a.name.parse().unwrap();
                    let ib: usize = b.name.parse().unwrap();
                    prop_assert!(ia < ib);
                }
            }
        }

        #[test]
        fn prop_filter_preserves_collection_order(
            categories in proptest::collection::vec(prop_oneof!["Sales", "Support", "sales ops"], 0..30)
        ) {
            let prompts: Vec<Prompt> = categories
                .iter()
                .enumerate()
                .map(|(i, c)| prompt(i as u64, "t", c, &[], &[]))
                .collect();
            let filter = PromptFilter { category: Some("SALES"), ..Default::default() };
            let matched = filter.apply(&prompts);

            for pair in matched.windows(2) {
                prop_assert!(pair[0].id < pair[1].id);
            }
            for p in &matched {
                prop_assert!(p.category.to_lowercase().contains("sales"));
            }
        }
    }
}
