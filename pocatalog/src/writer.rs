//! Deterministic PO/POT output.
//!
//! A catalog is always formatted completely in memory before anything is
//! written, so a failing write never leaves a truncated file behind.

use std::path::Path;

use crate::{
    error::Error,
    escape::escape,
    options::WriteOptions,
    traits::{FileSystem, LocalFileSystem},
    types::{Catalog, Entry, Template},
};

/// Formats a catalog exactly as it would be written.
///
/// The header is never wrapped; body entries wrap at `line_width`.
///
/// ```rust
/// use pocatalog::{Catalog, Entry, writer::format_catalog};
/// let catalog = Catalog {
///     comment: Some("Celestia".to_string()),
///     header: Entry::new("", "Language: fr\n"),
///     entries: vec![Entry::new("Open", "Ouvrir")],
/// };
/// assert_eq!(
///     format_catalog(&catalog, 50),
///     "# Celestia\n\nmsgid \"\"\nmsgstr \"\"\n\"Language: fr\\n\"\n\nmsgid \"Open\"\nmsgstr \"Ouvrir\""
/// );
/// ```
pub fn format_catalog(catalog: &Catalog, line_width: usize) -> String {
    format_parts(catalog, None, line_width, |_| None)
}

/// Formats `template` with the header translation and entry translations taken
/// from `catalog`.
///
/// An entry's translation is the one with the same id and context in
/// `catalog`, or failing that the first one with the same id. Entries with no
/// counterpart keep the template's (empty) string.
pub fn format_synced(catalog: &Catalog, template: &Template, line_width: usize) -> String {
    format_parts(
        template,
        Some(&catalog.header.string),
        line_width,
        |entry| counterpart(catalog, entry).map(|found| found.string.clone()),
    )
}

/// Formats `catalog` with every body translation replaced by `transform`.
pub fn format_transformed<T>(
    catalog: &Catalog,
    mut transform: T,
    line_width: usize,
) -> Result<String, Error>
where
    T: FnMut(&Entry) -> Result<String, Error>,
{
    let strings = catalog
        .entries
        .iter()
        .map(&mut transform)
        .collect::<Result<Vec<_>, _>>()?;
    let mut strings = strings.into_iter();
    Ok(format_parts(catalog, None, line_width, |_| strings.next()))
}

fn counterpart<'a>(catalog: &'a Catalog, entry: &Entry) -> Option<&'a Entry> {
    catalog
        .find(&entry.id, entry.context.as_deref())
        .or_else(|| catalog.entries.iter().find(|found| found.id == entry.id))
}

fn format_parts<F>(
    catalog: &Catalog,
    header_string: Option<&str>,
    line_width: usize,
    mut override_string: F,
) -> String
where
    F: FnMut(&Entry) -> Option<String>,
{
    let mut parts = Vec::with_capacity(catalog.entries.len() + 2);

    if let Some(comment) = &catalog.comment {
        parts.push(
            comment
                .split('\n')
                .map(|line| format!("# {line}").trim_end().to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }

    parts.push(format_entry(&catalog.header, None, header_string));

    for entry in &catalog.entries {
        let string = override_string(entry);
        parts.push(format_entry(entry, Some(line_width), string.as_deref()));
    }

    parts.join("\n\n")
}

fn format_entry(entry: &Entry, line_width: Option<usize>, override_string: Option<&str>) -> String {
    let mut lines = Vec::new();

    for line in comment_lines(&entry.translator_comments) {
        lines.push(format!("#  {line}"));
    }
    for line in comment_lines(&entry.extracted_comments) {
        lines.push(format!("#. {line}"));
    }
    for reference in &entry.references {
        lines.push(format!("#: {reference}"));
    }
    if !entry.flags.is_empty() {
        let flags = entry
            .flags
            .iter()
            .map(|flag| flag.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("#, {flags}"));
    }

    if let Some(context) = &entry.context {
        lines.push(format!("msgctxt {}", format_content(context, line_width)));
    }
    lines.push(format!("msgid {}", format_content(&entry.id, line_width)));
    let string = override_string.unwrap_or(&entry.string);
    lines.push(format!("msgstr {}", format_content(string, line_width)));

    lines.join("\n")
}

// One comment line per non-blank piece, so embedded newlines read back.
fn comment_lines(comments: &[String]) -> impl Iterator<Item = &str> {
    comments
        .iter()
        .flat_map(|comment| comment.split('\n'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// Splits a value into quoted literal lines.
///
/// Multi-line values and values wider than `line_width` start with an empty
/// `""` literal. Logical lines longer than `line_width` characters break
/// after the last space inside their first `line_width` characters.
pub fn format_content(content: &str, line_width: Option<usize>) -> String {
    let mut lines = content.split('\n').collect::<Vec<_>>();
    let mut fragments: Vec<String> = Vec::new();

    let too_wide = line_width.is_some_and(|width| lines[0].chars().count() > width);
    if lines.len() > 1 || too_wide {
        fragments.push(String::new());
    }

    // The index of the final logical line, counted before a trailing empty
    // line is dropped.
    let last_index = lines.len() - 1;
    if lines.len() > 1 && lines[last_index].is_empty() {
        lines.pop();
    }

    for (index, line) in lines.iter().enumerate() {
        let mut current = *line;
        if let Some(width) = line_width {
            while current.chars().count() > width {
                let window_end = current
                    .char_indices()
                    .nth(width)
                    .map_or(current.len(), |(offset, _)| offset);
                let Some(space) = current[..window_end].rfind(' ') else {
                    break;
                };
                fragments.push(current[..=space].to_string());
                current = &current[space + 1..];
            }
        }
        if index == last_index {
            fragments.push(current.to_string());
        } else {
            fragments.push(format!("{current}\n"));
        }
    }

    fragments
        .iter()
        .map(|fragment| format!("\"{}\"", escape(fragment, false)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes already formatted text through `fs`.
pub fn write_formatted<F: FileSystem>(
    fs: &F,
    text: &str,
    options: &WriteOptions,
    destination: &Path,
) -> Result<(), Error> {
    fs.write_bytes(destination, text.as_bytes(), options.without_overwriting)?;
    tracing::debug!(
        path = %destination.display(),
        bytes = text.len(),
        "wrote catalog"
    );
    Ok(())
}

/// Writes a catalog as it is.
pub fn write_catalog<P: AsRef<Path>>(
    catalog: &Catalog,
    options: &WriteOptions,
    destination: P,
) -> Result<(), Error> {
    let text = format_catalog(catalog, options.line_width);
    write_formatted(&LocalFileSystem, &text, options, destination.as_ref())
}

/// Writes a template as it is.
pub fn write_template<P: AsRef<Path>>(
    template: &Template,
    options: &WriteOptions,
    destination: P,
) -> Result<(), Error> {
    write_catalog(template, options, destination)
}

/// Writes the template's comment and header with a new list of entries.
pub fn update_template<P: AsRef<Path>>(
    template: &Template,
    entries: Vec<Entry>,
    options: &WriteOptions,
    destination: P,
) -> Result<(), Error> {
    let updated = template.with_entries(entries);
    write_template(&updated, options, destination)
}

/// Writes the template's structure carrying the translations of `catalog`.
///
/// Entries that exist only in `catalog` are dropped; entries new in the
/// template are written untranslated.
pub fn update_catalog<P: AsRef<Path>>(
    catalog: &Catalog,
    template: &Template,
    options: &WriteOptions,
    destination: P,
) -> Result<(), Error> {
    let text = format_synced(catalog, template, options.line_width);
    write_formatted(&LocalFileSystem, &text, options, destination.as_ref())
}

/// Writes `catalog` with every body translation replaced by `transform`.
///
/// Nothing is written if `transform` fails for any entry.
pub fn update_catalog_with<T, P>(
    catalog: &Catalog,
    transform: T,
    options: &WriteOptions,
    destination: P,
) -> Result<(), Error>
where
    T: FnMut(&Entry) -> Result<String, Error>,
    P: AsRef<Path>,
{
    let text = format_transformed(catalog, transform, options.line_width)?;
    write_formatted(&LocalFileSystem, &text, options, destination.as_ref())
}
