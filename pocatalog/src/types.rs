//! Core types for pocatalog.
//! The parser decodes into these; the writer serializes these.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

/// A parsed PO (catalog) or POT (template) file.
///
/// The header entry is kept apart from the body; `entries` is always in
/// collation order (see [`crate::collation`]).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Catalog {
    /// File-level comment, one line per `# ` line at the top of the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub comment: Option<String>,

    /// The reserved entry with an empty id, carrying file metadata.
    pub header: Entry,

    /// Body entries.
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// A template is a catalog whose entries are all untranslated.
pub type Template = Catalog;

impl Catalog {
    /// Returns a catalog with the same comment and header but different entries.
    pub fn with_entries(&self, entries: Vec<Entry>) -> Catalog {
        Catalog {
            comment: self.comment.clone(),
            header: self.header.clone(),
            entries,
        }
    }

    /// Translation of the first body entry with this id, ignoring context.
    pub fn string_for(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.string.as_str())
    }

    /// Looks up a body entry by its full key.
    pub fn find(&self, id: &str, context: Option<&str>) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| e.id == id && e.context.as_deref() == context)
    }

    /// Returns `true` if no body entry carries a translation.
    pub fn is_template(&self) -> bool {
        self.entries.iter().all(|e| e.string.is_empty())
    }

    /// The `Key: Value` pairs of the header, in file order.
    ///
    /// Lines without a colon are skipped.
    pub fn header_fields(&self) -> Vec<(&str, &str)> {
        self.header
            .string
            .lines()
            .filter_map(|line| {
                let (key, value) = line.split_once(':')?;
                Some((key.trim(), value.trim()))
            })
            .collect()
    }

    /// Gets a header field by (case-sensitive) name.
    pub fn header_field(&self, key: &str) -> Option<&str> {
        self.header_fields()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// The `Language` header field, if present and a valid identifier.
    pub fn language(&self) -> Option<LanguageIdentifier> {
        self.header_field("Language")
            .filter(|lang| !lang.is_empty())
            .and_then(|lang| lang.parse().ok())
    }
}

/// One translatable unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Entry {
    /// Comments written by translators (`#  `).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub translator_comments: Vec<String>,

    /// Comments produced by extraction tools (`#. `).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub extracted_comments: Vec<String>,

    /// Source locations (`#: `).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub references: Vec<Reference>,

    /// Format flags (`#, `).
    #[serde(skip_serializing_if = "Flags::is_empty")]
    #[serde(default)]
    pub flags: Flags,

    /// The message identifier (`msgid`); empty for the header only.
    pub id: String,

    /// The translation (`msgstr`); empty means untranslated.
    pub string: String,

    /// Disambiguating context (`msgctxt`).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub context: Option<String>,
}

impl Entry {
    pub fn new(id: impl Into<String>, string: impl Into<String>) -> Self {
        Entry {
            id: id.into(),
            string: string.into(),
            ..Entry::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_translator_comment(mut self, comment: impl Into<String>) -> Self {
        self.translator_comments.push(comment.into());
        self
    }

    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.flags.insert(flag);
        self
    }

    pub fn is_translated(&self) -> bool {
        !self.string.is_empty()
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.context {
            Some(context) => write!(f, "Entry {{ id: {}, context: {} }}", self.id, context),
            None => write!(f, "Entry {{ id: {} }}", self.id),
        }
    }
}

/// A `path` or `path:line` source reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Reference {
    pub source_file_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub line_number: Option<u32>,
}

impl Reference {
    pub fn new(source_file_path: impl Into<String>, line_number: Option<u32>) -> Self {
        Reference {
            source_file_path: source_file_path.into(),
            line_number,
        }
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line_number {
            Some(line) => write!(f, "{}:{}", self.source_file_path, line),
            None => write!(f, "{}", self.source_file_path),
        }
    }
}

/// A single format flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Flag {
    CFormat,
    CppFormat,
    QtFormat,
    Fuzzy,
}

impl Flag {
    /// All flags, in the order they are written on a `#, ` line.
    pub const ALL: [Flag; 4] = [Flag::CFormat, Flag::CppFormat, Flag::QtFormat, Flag::Fuzzy];

    pub fn as_str(self) -> &'static str {
        match self {
            Flag::CFormat => "c-format",
            Flag::CppFormat => "c++-format",
            Flag::QtFormat => "qt-format",
            Flag::Fuzzy => "fuzzy",
        }
    }
}

impl Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of flags on one entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Flags {
    #[serde(default)]
    c_format: bool,
    #[serde(default)]
    cpp_format: bool,
    #[serde(default)]
    qt_format: bool,
    #[serde(default)]
    fuzzy: bool,
}

impl Flags {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, flag: Flag) -> &mut bool {
        match flag {
            Flag::CFormat => &mut self.c_format,
            Flag::CppFormat => &mut self.cpp_format,
            Flag::QtFormat => &mut self.qt_format,
            Flag::Fuzzy => &mut self.fuzzy,
        }
    }

    pub fn insert(&mut self, flag: Flag) {
        *self.slot(flag) = true;
    }

    pub fn contains(&self, flag: Flag) -> bool {
        match flag {
            Flag::CFormat => self.c_format,
            Flag::CppFormat => self.cpp_format,
            Flag::QtFormat => self.qt_format,
            Flag::Fuzzy => self.fuzzy,
        }
    }

    pub fn union(self, other: Flags) -> Flags {
        Flags {
            c_format: self.c_format || other.c_format,
            cpp_format: self.cpp_format || other.cpp_format,
            qt_format: self.qt_format || other.qt_format,
            fuzzy: self.fuzzy || other.fuzzy,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.c_format || self.cpp_format || self.qt_format || self.fuzzy)
    }

    /// Present flags in `#, ` line order.
    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        Flag::ALL.into_iter().filter(|flag| self.contains(*flag))
    }
}

impl FromIterator<Flag> for Flags {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        let mut flags = Flags::new();
        for flag in iter {
            flags.insert(flag);
        }
        flags
    }
}
