//! Fills untranslated entries of one locale from a sibling locale.
//!
//! Typical use is deriving Traditional Chinese strings from Simplified
//! Chinese ones through a script converter.

use crate::{
    error::Error,
    traits::Converter,
    types::{Catalog, Entry},
};

/// The translation to write for `entry`.
///
/// A translated entry keeps its string. An untranslated one gets the
/// converted string of the first `sibling` entry with the same id, or stays
/// empty when the sibling has no such entry or it is untranslated too.
pub fn backfill_string<C>(entry: &Entry, sibling: &Catalog, converter: &C) -> Result<String, Error>
where
    C: Converter + ?Sized,
{
    if entry.is_translated() {
        return Ok(entry.string.clone());
    }
    match sibling.string_for(&entry.id) {
        Some(source) if !source.is_empty() => {
            let converted = converter.convert(source)?;
            tracing::trace!(id = %entry.id, "backfilled entry");
            Ok(converted)
        }
        _ => Ok(String::new()),
    }
}

/// Returns `target` with every untranslated entry backfilled from `sibling`.
pub fn backfill<C>(target: &Catalog, sibling: &Catalog, converter: &C) -> Result<Catalog, Error>
where
    C: Converter + ?Sized,
{
    let entries = target
        .entries
        .iter()
        .map(|entry| {
            Ok(Entry {
                string: backfill_string(entry, sibling, converter)?,
                ..entry.clone()
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;
    Ok(target.with_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn catalog(entries: Vec<Entry>) -> Catalog {
        Catalog {
            comment: None,
            header: Entry::new("", "Language: zh_TW\n"),
            entries,
        }
    }

    struct Failing;

    impl Converter for Failing {
        fn convert(&self, _text: &str) -> Result<String, Error> {
            Err(Error::conversion_error("service unavailable", None))
        }
    }

    #[test]
    fn test_backfill_converts_only_empty_strings() {
        let sibling = catalog(vec![
            Entry::new("Open", "打开"),
            Entry::new("Close", "关闭"),
            Entry::new("Quit", ""),
        ]);
        let target = catalog(vec![
            Entry::new("Close", ""),
            Entry::new("Missing", ""),
            Entry::new("Open", "開啟"),
            Entry::new("Quit", ""),
        ]);

        let calls = Cell::new(0);
        let converter = |text: &str| {
            calls.set(calls.get() + 1);
            format!("[{text}]")
        };
        let filled = backfill(&target, &sibling, &converter).unwrap();

        let strings = filled
            .entries
            .iter()
            .map(|e| e.string.as_str())
            .collect::<Vec<_>>();
        assert_eq!(strings, vec!["[关闭]", "", "開啟", ""]);
        assert_eq!(calls.get(), 1);
        assert_eq!(filled.header, target.header);
    }

    #[test]
    fn test_backfill_matches_by_id_only() {
        let sibling = catalog(vec![Entry::new("Open", "打开").with_context("menu")]);
        let target = catalog(vec![Entry::new("Open", "")]);
        let filled = backfill(&target, &sibling, &|text: &str| text.to_string()).unwrap();
        assert_eq!(filled.entries[0].string, "打开");
    }

    #[test]
    fn test_converter_failure_is_propagated() {
        let sibling = catalog(vec![Entry::new("Open", "打开")]);
        let target = catalog(vec![Entry::new("Open", "")]);
        assert!(matches!(
            backfill(&target, &sibling, &Failing),
            Err(Error::Conversion { .. })
        ));
    }

    #[test]
    fn test_translated_entries_never_reach_converter() {
        let sibling = catalog(vec![Entry::new("Open", "打开")]);
        let target = catalog(vec![Entry::new("Open", "開啟")]);
        let filled = backfill(&target, &sibling, &Failing).unwrap();
        assert_eq!(filled.entries[0].string, "開啟");
    }
}
