use anyhow::{Context, Result};
use pocatalog::{Catalog, Entry, Flag};
use serde::Serialize;

/// Counts shown by `pocatalog inspect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub language: Option<String>,
    pub template: bool,
    pub entries: usize,
    pub translated: usize,
    pub untranslated: usize,
    pub fuzzy: usize,
    pub c_format: usize,
    pub with_context: usize,
    pub header: Vec<(String, String)>,
}

impl Summary {
    pub fn of(catalog: &Catalog) -> Self {
        let translated = count(catalog, |entry| entry.is_translated());

        Summary {
            language: catalog.language().map(|lang| lang.to_string()),
            template: catalog.is_template(),
            entries: catalog.entries.len(),
            translated,
            untranslated: catalog.entries.len() - translated,
            fuzzy: count(catalog, |entry| entry.flags.contains(Flag::Fuzzy)),
            c_format: count(catalog, |entry| entry.flags.contains(Flag::CFormat)),
            with_context: count(catalog, |entry| entry.context.is_some()),
            header: catalog
                .header_fields()
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    /// Share of translated entries; an empty catalog counts as complete.
    pub fn percent_translated(&self) -> f64 {
        if self.entries == 0 {
            100.0
        } else {
            (self.translated as f64) * 100.0 / (self.entries as f64)
        }
    }
}

fn count(catalog: &Catalog, predicate: impl Fn(&Entry) -> bool) -> usize {
    catalog.entries.iter().filter(|entry| predicate(entry)).count()
}

pub fn render_summary(name: &str, summary: &Summary) -> String {
    let mut lines = vec![
        format!("File: {name}"),
        format!("Language: {}", summary.language.as_deref().unwrap_or("-")),
        format!(
            "Kind: {}",
            if summary.template { "template" } else { "catalog" }
        ),
        format!("Entries: {}", summary.entries),
        format!(
            "Translated: {} ({:.1}%)",
            summary.translated,
            summary.percent_translated()
        ),
        format!("Untranslated: {}", summary.untranslated),
        format!("Fuzzy: {}", summary.fuzzy),
        format!("C format: {}", summary.c_format),
        format!("With context: {}", summary.with_context),
    ];
    if !summary.header.is_empty() {
        lines.push("Header:".to_string());
        for (key, value) in &summary.header {
            lines.push(format!("  {key}: {value}"));
        }
    }
    lines.join("\n")
}

/// The whole catalog as pretty-printed JSON.
pub fn render_json(catalog: &Catalog) -> Result<String> {
    serde_json::to_string_pretty(catalog).context("Failed to serialize catalog to JSON")
}
