//! Merges the entries extracted from each platform into one template body.

use std::{collections::HashMap, fmt::Display, path::Path};

use crate::{
    collation,
    error::Error,
    extractor::extract_from_directory,
    traits::FileSystem,
    types::{Entry, Reference},
};

/// A platform whose sources are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Apple,
    Android,
    Windows,
}

impl Platform {
    /// All platforms, in the order they are listed in a `Platforms:` comment.
    pub const ALL: [Platform; 3] = [Platform::Apple, Platform::Android, Platform::Windows];

    pub fn name(self) -> &'static str {
        match self {
            Platform::Apple => "Apple",
            Platform::Android => "Android",
            Platform::Windows => "Windows",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of platforms an entry was found on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Platforms {
    apple: bool,
    android: bool,
    windows: bool,
}

impl Platforms {
    pub fn contains(&self, platform: Platform) -> bool {
        match platform {
            Platform::Apple => self.apple,
            Platform::Android => self.android,
            Platform::Windows => self.windows,
        }
    }

    pub fn insert(&mut self, platform: Platform) {
        match platform {
            Platform::Apple => self.apple = true,
            Platform::Android => self.android = true,
            Platform::Windows => self.windows = true,
        }
    }

    pub fn union(self, other: Platforms) -> Platforms {
        Platforms {
            apple: self.apple || other.apple,
            android: self.android || other.android,
            windows: self.windows || other.windows,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Platform> + '_ {
        Platform::ALL
            .into_iter()
            .filter(|platform| self.contains(*platform))
    }
}

impl From<Platform> for Platforms {
    fn from(platform: Platform) -> Self {
        let mut platforms = Platforms::default();
        platforms.insert(platform);
        platforms
    }
}

impl Display for Platforms {
    /// `Apple, Android, Windows` subset, in that order.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self.iter().map(Platform::name).collect::<Vec<_>>();
        f.write_str(&names.join(", "))
    }
}

/// An entry together with the platforms it was seen on, while merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInformation {
    pub entry: Entry,
    pub platforms: Platforms,
}

fn union_comments(first: &[String], second: &[String]) -> Vec<String> {
    let mut comments = first.iter().chain(second).cloned().collect::<Vec<_>>();
    comments.sort_by(|a, b| collation::compare(a, b));
    comments.dedup();
    comments
}

fn union_references(first: &[Reference], second: &[Reference]) -> Vec<Reference> {
    let mut references = first.iter().chain(second).cloned().collect::<Vec<_>>();
    references.sort_by(collation::compare_references);
    references.dedup();
    references
}

/// Folds `other` into `entry`. Id, string and context stay those of `entry`.
pub fn merge_entries(entry: &Entry, other: &Entry) -> Entry {
    Entry {
        translator_comments: union_comments(&entry.translator_comments, &other.translator_comments),
        extracted_comments: union_comments(&entry.extracted_comments, &other.extracted_comments),
        references: union_references(&entry.references, &other.references),
        flags: entry.flags.union(other.flags),
        id: entry.id.clone(),
        string: entry.string.clone(),
        context: entry.context.clone(),
    }
}

/// Merges per-platform entry lists into one sorted, deduplicated list.
///
/// Entries sharing an `(id, context)` key are folded together in the order
/// the lists are given. Every resulting entry starts with a
/// `Platforms: ...` translator comment.
pub fn merge<I>(sources: I) -> Vec<Entry>
where
    I: IntoIterator<Item = (Platform, Vec<Entry>)>,
{
    let mut merged: HashMap<(String, Option<String>), EntryInformation> = HashMap::new();

    for (platform, entries) in sources {
        for entry in entries {
            let key = (entry.id.clone(), entry.context.clone());
            match merged.get_mut(&key) {
                Some(existing) => {
                    existing.entry = merge_entries(&existing.entry, &entry);
                    existing.platforms = existing.platforms.union(platform.into());
                }
                None => {
                    merged.insert(
                        key,
                        EntryInformation {
                            entry,
                            platforms: platform.into(),
                        },
                    );
                }
            }
        }
    }

    let mut infos = merged.into_values().collect::<Vec<_>>();
    infos.sort_by(|a, b| collation::compare_entries(&a.entry, &b.entry));

    infos
        .into_iter()
        .map(|info| {
            let mut entry = info.entry;
            entry
                .translator_comments
                .insert(0, format!("Platforms: {}", info.platforms));
            entry
        })
        .collect()
}

/// Extracts the three platform trees and merges them.
pub fn extract_strings<F: FileSystem>(
    fs: &F,
    apple_root: &Path,
    android_root: &Path,
    windows_root: &Path,
) -> Result<Vec<Entry>, Error> {
    let apple = extract_from_directory(fs, apple_root)?;
    let android = extract_from_directory(fs, android_root)?;
    let windows = extract_from_directory(fs, windows_root)?;
    tracing::debug!(
        apple = apple.len(),
        android = android.len(),
        windows = windows.len(),
        "extracted platform strings"
    );

    Ok(merge([
        (Platform::Apple, apple),
        (Platform::Android, android),
        (Platform::Windows, windows),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{traits::memory::MemoryFileSystem, types::Flag};

    #[test]
    fn test_platforms_display() {
        let mut platforms = Platforms::from(Platform::Windows);
        platforms.insert(Platform::Apple);
        assert_eq!(platforms.to_string(), "Apple, Windows");
        assert_eq!(Platforms::default().to_string(), "");
    }

    #[test]
    fn test_platforms_union() {
        let both = Platforms::from(Platform::Android).union(Platform::Apple.into());
        assert_eq!(both.to_string(), "Apple, Android");
        assert_eq!(both.union(Platform::Android.into()), both);
    }

    #[test]
    fn test_merge_unions_shared_entries() {
        let apple = vec![
            Entry::new("Open", "")
                .with_translator_comment("verb")
                .with_flag(Flag::CFormat),
        ];
        let mut android_open = Entry::new("Open", "")
            .with_translator_comment("action")
            .with_translator_comment("verb");
        android_open.references = vec![
            Reference::new("b.kt", None),
            Reference::new("a.kt", Some(10)),
            Reference::new("a.kt", Some(2)),
        ];
        let android = vec![android_open];
        let windows = vec![Entry::new("Open", "").with_flag(Flag::Fuzzy)];

        let merged = merge([
            (Platform::Apple, apple),
            (Platform::Android, android),
            (Platform::Windows, windows),
        ]);
        assert_eq!(merged.len(), 1);
        let entry = &merged[0];
        assert_eq!(
            entry.translator_comments,
            vec!["Platforms: Apple, Android, Windows", "action", "verb"]
        );
        assert_eq!(
            entry.references,
            vec![
                Reference::new("a.kt", Some(2)),
                Reference::new("a.kt", Some(10)),
                Reference::new("b.kt", None),
            ]
        );
        assert!(entry.flags.contains(Flag::CFormat));
        assert!(entry.flags.contains(Flag::Fuzzy));
    }

    #[test]
    fn test_merge_keeps_contexts_apart_and_sorts() {
        let apple = vec![Entry::new("Open", "").with_context("menu"), Entry::new("Zoom", "")];
        let android = vec![Entry::new("Open", ""), Entry::new("Item 10", ""), Entry::new("item 2", "")];
        let merged = merge([(Platform::Apple, apple), (Platform::Android, android)]);

        let summary = merged
            .iter()
            .map(|e| {
                (
                    e.id.as_str(),
                    e.context.as_deref(),
                    e.translator_comments[0].as_str(),
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            vec![
                ("item 2", None, "Platforms: Android"),
                ("Item 10", None, "Platforms: Android"),
                ("Open", None, "Platforms: Android"),
                ("Open", Some("menu"), "Platforms: Apple"),
                ("Zoom", None, "Platforms: Apple"),
            ]
        );
    }

    #[test]
    fn test_first_seen_string_wins() {
        let apple = vec![Entry::new("Open", "first")];
        let windows = vec![Entry::new("Open", "second")];
        let merged = merge([(Platform::Apple, apple), (Platform::Windows, windows)]);
        assert_eq!(merged[0].string, "first");
        assert_eq!(merged[0].translator_comments, vec!["Platforms: Apple, Windows"]);
    }

    #[test]
    fn test_extract_strings_from_three_trees() {
        let fs = MemoryFileSystem::new()
            .with_file("apple/App.swift", r#"CelestiaString("Open", comment: "")"#)
            .with_file(
                "android/Main.kt",
                r#"CelestiaString("Open", ""); CelestiaString("%d km", "distance")"#,
            )
            .with_file(
                "windows/Menu.cs",
                r#"LocalizationHelper.Localize("Open", "menu", "Menu item")"#,
            );
        let entries = extract_strings(
            &fs,
            Path::new("apple"),
            Path::new("android"),
            Path::new("windows"),
        )
        .unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].id, "%d km");
        assert_eq!(
            entries[0].translator_comments,
            vec!["Platforms: Android", "distance"]
        );
        assert!(entries[0].flags.contains(Flag::CFormat));
        assert_eq!(entries[1].id, "Open");
        assert_eq!(entries[1].translator_comments, vec!["Platforms: Apple, Android"]);
        assert_eq!(entries[2].context.as_deref(), Some("menu"));
        assert_eq!(
            entries[2].translator_comments,
            vec!["Platforms: Windows", "Menu item"]
        );
    }

    #[test]
    fn test_extract_strings_propagates_enumeration_error() {
        let fs = MemoryFileSystem::new().with_file("apple/App.swift", "");
        let err = extract_strings(
            &fs,
            Path::new("apple"),
            Path::new("android"),
            Path::new("windows"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Enumeration { .. }));
    }
}
