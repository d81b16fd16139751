//! Text rendering of catalog results for the terminal

use colored::*;

use crate::catalog::{PackView, SearchResults};
use crate::source::{Category, Pack, Persona, Prompt, Tag};

fn prompt_line(prompt: &Prompt) -> String {
    let mut line = format!(
        "{} {} {}",
        format!("#{}", prompt.id).yellow(),
        prompt.title.bold(),
        format!("[{} / {}]", prompt.category, prompt.subcategory).dimmed()
    );
    if !prompt.tags.is_empty() {
        line.push_str(&format!(" {}", prompt.tags.join(", ").cyan()));
    }
    line
}

/// One line per prompt
pub fn prompt_list(prompts: &[Prompt]) -> String {
    if prompts.is_empty() {
        return "No prompts found".to_string();
    }
    prompts.iter().map(prompt_line).collect::<Vec<_>>().join("\n")
}

pub fn search_results(results: &SearchResults) -> String {
    format!(
        "{}\n{}",
        format!("{} result(s)", results.count).green(),
        prompt_list(&results.prompts)
    )
}

/// Full prompt, body included
pub fn prompt_detail(prompt: &Prompt) -> String {
    let mut out = vec![prompt_line(prompt)];
    if !prompt.pack_title.is_empty() {
        out.push(format!("  Pack: {}", prompt.pack_title));
    }
    if !prompt.use_case.is_empty() {
        out.push(format!("  Use case: {}", prompt.use_case));
    }
    if !prompt.personas.is_empty() {
        out.push(format!("  Personas: {}", prompt.personas.join(", ")));
    }
    out.push(String::new());
    out.push(prompt.prompt.clone());
    out.join("\n")
}

pub fn categories(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found".to_string();
    }
    categories
        .iter()
        .map(|c| {
            let mut line = format!(
                "{} {} {}",
                c.icon,
                c.name.bold(),
                format!("({} prompts)", c.prompt_count).dimmed()
            );
            if !c.description.is_empty() {
                line.push_str(&format!("\n  {}", c.description));
            }
            if !c.subcategories.is_empty() {
                line.push_str(&format!("\n  {}", c.subcategories.join(", ").cyan()));
            }
            line.trim_start().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn packs(packs: &[Pack]) -> String {
    if packs.is_empty() {
        return "No packs found".to_string();
    }
    packs
        .iter()
        .map(|p| {
            format!(
                "{} {} {}",
                p.title.bold(),
                format!("[{}]", p.category).dimmed(),
                format!("{} prompts", p.total_prompts).yellow()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pack sections with their prompts
pub fn pack_view(view: &PackView) -> String {
    let mut out = vec![format!(
        "{} {}",
        view.pack_title.bold(),
        format!("({} prompts)", view.total_prompts).dimmed()
    )];
    for section in &view.sections {
        let name = if section.name.is_empty() { "(none)" } else { section.name.as_str() };
        out.push(format!("\n{} {}", name.green(), format!("({})", section.count).dimmed()));
        for prompt in &section.prompts {
            out.push(format!("  {}", prompt_line(prompt)));
        }
    }
    out.join("\n")
}

fn name_counts<'a>(items: impl Iterator<Item = (&'a str, u64)>) -> String {
    let lines: Vec<String> = items
        .map(|(name, count)| format!("{}  {}", format!("{:>6}", count).yellow(), name))
        .collect();
    if lines.is_empty() {
        "Nothing found".to_string()
    } else {
        lines.join("\n")
    }
}

pub fn tags(tags: &[Tag]) -> String {
    name_counts(tags.iter().map(|t| (t.name.as_str(), t.count)))
}

pub fn personas(personas: &[Persona]) -> String {
    name_counts(personas.iter().map(|p| (p.name.as_str(), p.count)))
}
