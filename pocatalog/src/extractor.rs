//! Scans platform source trees for localizable string literals.
//!
//! Each supported source kind has two call-site patterns, one without and
//! one with a context argument:
//!
//! | kind    | call                                                     |
//! |---------|----------------------------------------------------------|
//! | `cpp`   | `LocalizationHelper::Localize(L"id", [L"context",] L"comment")` |
//! | `cs`    | `LocalizationHelper.Localize("id", ["context",] "comment")`     |
//! | `swift` | `CelestiaString("id", [context: "context",] comment: "comment")`|
//! | `kt`    | `CelestiaString("id", ["context",] "comment")`                  |

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    escape::unescape,
    traits::FileSystem,
    types::{Entry, Flag},
};

/// A quoted literal body with backslash escapes.
const LITERAL: &str = r#""([^"\\]*(?:\\.[^"\\]*)*)""#;

struct CallPatterns {
    two_arguments: Regex,
    three_arguments: Regex,
}

impl CallPatterns {
    /// `callee` is the pattern up to the opening parenthesis. The labels are
    /// matched right before the context and comment literals.
    fn new(callee: &str, literal_prefix: &str, context_label: &str, comment_label: &str) -> Self {
        let literal = format!("{literal_prefix}{LITERAL}");
        let open = format!(r"{callee}\s*\(\s*{literal}");
        let context = format!(r"\s*,\s*{context_label}{literal}");
        let comment = format!(r"\s*,\s*{comment_label}{literal}");
        let close = r"\s*\)";

        CallPatterns {
            two_arguments: Regex::new(&format!("{open}{comment}{close}")).unwrap(),
            three_arguments: Regex::new(&format!("{open}{context}{comment}{close}")).unwrap(),
        }
    }
}

lazy_static! {
    static ref CPP: CallPatterns =
        CallPatterns::new(r"LocalizationHelper\s*::\s*Localize", "L", "", "");
    static ref CSHARP: CallPatterns =
        CallPatterns::new(r"LocalizationHelper\s*\.\s*Localize", "", "", "");
    static ref SWIFT: CallPatterns = CallPatterns::new(
        r"CelestiaString",
        "",
        r"context\s*:\s*",
        r"comment\s*:\s*"
    );
    static ref KOTLIN: CallPatterns = CallPatterns::new(r"CelestiaString", "", "", "");
    static ref FORMAT_SPECIFIER: Regex =
        Regex::new(r"%[0 #+-]?[0-9*]*\.?\d*[hl]{0,2}[jztL]?[diuoxXeEfgGaAcpsSn%@]").unwrap();
}

/// Source languages the extractor understands, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Cpp,
    CSharp,
    Swift,
    Kotlin,
}

impl SourceKind {
    /// Maps a file extension (without the dot) to a source kind.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "cpp" => Some(SourceKind::Cpp),
            "cs" => Some(SourceKind::CSharp),
            "swift" => Some(SourceKind::Swift),
            "kt" => Some(SourceKind::Kotlin),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|extension| extension.to_str())
            .and_then(Self::from_extension)
    }

    fn patterns(self) -> &'static CallPatterns {
        match self {
            SourceKind::Cpp => &CPP,
            SourceKind::CSharp => &CSHARP,
            SourceKind::Swift => &SWIFT,
            SourceKind::Kotlin => &KOTLIN,
        }
    }
}

/// Returns `true` if `text` contains a printf-style conversion specifier.
///
/// ```rust
/// use pocatalog::extractor::has_format_specifier;
/// assert!(has_format_specifier("%d objects"));
/// assert!(has_format_specifier("Hello %@"));
/// assert!(!has_format_specifier("100 percent"));
/// ```
pub fn has_format_specifier(text: &str) -> bool {
    FORMAT_SPECIFIER.is_match(text)
}

fn decode(raw: &str) -> Result<String, Error> {
    unescape(raw).ok_or_else(|| Error::bad_content(raw))
}

fn create_entry(id: &str, context: Option<&str>, comment: &str) -> Result<Entry, Error> {
    let mut entry = Entry::new(decode(id)?, "");
    let comment = decode(comment)?;
    if !comment.is_empty() {
        entry.translator_comments.push(comment);
    }
    entry.context = context.map(decode).transpose()?;
    if has_format_specifier(&entry.id) {
        entry.flags.insert(Flag::CFormat);
    }
    Ok(entry)
}

/// Extracts the entries of one source file's content.
///
/// All two-argument calls come first, then all three-argument calls, each in
/// source order.
pub fn extract_from_source(kind: SourceKind, content: &str) -> Result<Vec<Entry>, Error> {
    let patterns = kind.patterns();
    let mut entries = Vec::new();

    for captures in patterns.two_arguments.captures_iter(content) {
        entries.push(create_entry(&captures[1], None, &captures[2])?);
    }
    for captures in patterns.three_arguments.captures_iter(content) {
        entries.push(create_entry(&captures[1], Some(&captures[2]), &captures[3])?);
    }

    Ok(entries)
}

/// Extracts the entries of one file. Files of unknown kind yield nothing
/// and are not read.
pub fn extract_from_file<F: FileSystem>(fs: &F, path: &Path) -> Result<Vec<Entry>, Error> {
    let Some(kind) = SourceKind::from_path(path) else {
        return Ok(Vec::new());
    };
    let bytes = fs.read_bytes(path)?;
    let content = std::str::from_utf8(&bytes).map_err(|_| Error::Encoding)?;
    let entries = extract_from_source(kind, content)?;
    tracing::debug!(
        path = %path.display(),
        kind = ?kind,
        entries = entries.len(),
        "scanned source file"
    );
    Ok(entries)
}

/// Recursively extracts every file below `root`, visiting each directory's
/// children in path order.
pub fn extract_from_directory<F: FileSystem>(fs: &F, root: &Path) -> Result<Vec<Entry>, Error> {
    let mut children = fs.list(root)?;
    children.sort_by(|a, b| a.path.cmp(&b.path));

    let mut entries = Vec::new();
    for child in children {
        if child.is_directory {
            entries.extend(extract_from_directory(fs, &child.path)?);
        } else {
            entries.extend(extract_from_file(fs, &child.path)?);
        }
    }
    Ok(entries)
}
