use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use pocatalog::{
    Catalog, Converter, Error, LocalFileSystem, WriteOptions,
    backfill::backfill,
    merge::extract_strings,
    writer::{self, update_catalog, update_template, write_catalog},
};
use tracing::{info, warn};

use crate::{
    inspect::{Summary, render_json, render_summary},
    validation::{
        validate_catalog_extension, validate_directory, validate_file_path, validate_output_path,
    },
};

/// Inputs of `pocatalog extract`.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub apple_root: PathBuf,
    pub android_root: PathBuf,
    pub windows_root: PathBuf,
    pub template: PathBuf,
    pub output: Option<PathBuf>,
}

fn read_catalog(path: &Path, template: bool) -> Result<Catalog> {
    validate_file_path(path).map_err(|e| anyhow!(e))?;
    if let Err(message) = validate_catalog_extension(path, template) {
        warn!("{message}");
    }
    let catalog = if template {
        Catalog::read_template(path)
    } else {
        Catalog::read_from(path)
    };
    catalog.map_err(|err| describe_read_error(err, path))
}

fn describe_read_error(err: Error, path: &Path) -> anyhow::Error {
    let action = if err.is_grammar_error() { "parse" } else { "read" };
    anyhow::Error::new(err).context(format!("Failed to {action} {}", path.display()))
}

fn destination<'a>(input: &'a Path, output: Option<&'a Path>) -> Result<&'a Path> {
    let path = output.unwrap_or(input);
    validate_output_path(path).map_err(|e| anyhow!(e))?;
    Ok(path)
}

/// Scans the three source trees and rewrites the template's entries.
pub fn run_extract(options: &ExtractOptions, write: &WriteOptions) -> Result<()> {
    for root in [
        &options.apple_root,
        &options.android_root,
        &options.windows_root,
    ] {
        validate_directory(root).map_err(|e| anyhow!(e))?;
    }
    let template = read_catalog(&options.template, true)?;
    let entries = extract_strings(
        &LocalFileSystem,
        &options.apple_root,
        &options.android_root,
        &options.windows_root,
    )
    .context("Failed to extract strings")?;
    info!(entries = entries.len(), "extracted entries");

    let output = destination(&options.template, options.output.as_deref())?;
    update_template(&template, entries, write, output)
        .with_context(|| format!("Failed to write {}", output.display()))
}

/// Parses a template and writes it back in canonical form.
pub fn run_format(template_path: &Path, output: Option<&Path>, write: &WriteOptions) -> Result<()> {
    let template = read_catalog(template_path, true)?;
    let output = destination(template_path, output)?;
    writer::write_template(&template, write, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), entries = template.entries.len(), "formatted template");
    Ok(())
}

/// Rewrites a translation with the template's structure.
pub fn run_update(
    catalog_path: &Path,
    template_path: &Path,
    output: Option<&Path>,
    write: &WriteOptions,
) -> Result<()> {
    let catalog = read_catalog(catalog_path, false)?;
    let template = read_catalog(template_path, true)?;
    let output = destination(catalog_path, output)?;
    update_catalog(&catalog, &template, write, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), entries = template.entries.len(), "updated catalog");
    Ok(())
}

/// Fills the target's untranslated entries from the source catalog.
pub fn run_translate<C: Converter>(
    source_path: &Path,
    target_path: &Path,
    converter: &C,
    output: Option<&Path>,
    write: &WriteOptions,
) -> Result<()> {
    let source = read_catalog(source_path, false)?;
    let target = read_catalog(target_path, false)?;
    let output = destination(target_path, output)?;

    let filled = backfill(&target, &source, converter)
        .with_context(|| format!("Failed to translate {}", target_path.display()))?;
    let converted = target
        .entries
        .iter()
        .zip(&filled.entries)
        .filter(|(before, after)| !before.is_translated() && after.is_translated())
        .count();
    write_catalog(&filled, write, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), converted, "translated catalog");
    Ok(())
}

/// Renders a catalog summary, or the catalog as JSON.
pub fn run_inspect(path: &Path, json: bool) -> Result<String> {
    validate_file_path(path).map_err(|e| anyhow!(e))?;
    let catalog = Catalog::read_from(path).map_err(|err| describe_read_error(err, path))?;
    if json {
        render_json(&catalog)
    } else {
        Ok(render_summary(
            &path.display().to_string(),
            &Summary::of(&catalog),
        ))
    }
}
