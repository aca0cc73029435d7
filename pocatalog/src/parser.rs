//! Parser for the PO/POT line grammar.
//!
//! The input is split into trimmed, non-blank lines and consumed by a
//! cursor. Each entry is read until a comment line follows its content, so
//! consecutive entries are always separated by at least one comment.

use std::{path::Path, str::FromStr};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    collation,
    error::Error,
    escape::unescape,
    options::ParseOptions,
    traits::{FileSystem, LocalFileSystem},
    types::{Catalog, Entry, Flag, Flags, Reference, Template},
};

lazy_static! {
    static ref LINE_BREAK: Regex = Regex::new(r"\r\n|\r|\n").unwrap();
    static ref COMMENT_LINE: Regex = Regex::new(r"^#([ .:,])\s*(.+)$").unwrap();
    static ref CONTENT_LINE: Regex =
        Regex::new(r#"^([A-Za-z_][A-Za-z0-9_\[\]]*)\s*"(.*)"$"#).unwrap();
    static ref CONTINUATION_LINE: Regex = Regex::new(r#"^"(.*)"$"#).unwrap();
    static ref FLAG_SEPARATOR: Regex = Regex::new(r",\s*").unwrap();
    static ref NUMBERED_REFERENCE: Regex = Regex::new(r"^(.+):(\d+)$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentType {
    Msgid,
    Msgctxt,
    Msgstr,
}

impl ContentType {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "msgid" => Some(ContentType::Msgid),
            "msgctxt" => Some(ContentType::Msgctxt),
            "msgstr" => Some(ContentType::Msgstr),
            _ => None,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            ContentType::Msgid => "msgid",
            ContentType::Msgctxt => "msgctxt",
            ContentType::Msgstr => "msgstr",
        }
    }
}

enum Comment {
    Translator(String),
    Extracted(String),
    References(Vec<Reference>),
    Flags(Flags),
}

/// Parses a PO or POT file from raw bytes.
pub fn parse_catalog(bytes: &[u8], options: &ParseOptions) -> Result<Catalog, Error> {
    let text = std::str::from_utf8(bytes).map_err(|_| Error::Encoding)?;
    parse_str(text, options)
}

/// Parses a PO or POT file from text.
pub fn parse_str(text: &str, options: &ParseOptions) -> Result<Catalog, Error> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines = LINE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();

    let mut cursor = Cursor { lines, position: 0 };
    let comment = cursor.file_comment();

    if cursor.is_exhausted() {
        return Err(Error::MissingHeader);
    }
    let header = cursor.next_entry()?;
    if !header.id.is_empty() {
        return Err(Error::MissingHeader);
    }

    let mut entries = Vec::new();
    while !cursor.is_exhausted() {
        let entry = cursor.next_entry()?;
        if options.template && entry.is_translated() {
            return Err(Error::NonEmptyStringInTemplate(entry.id));
        }
        tracing::trace!(id = %entry.id, context = ?entry.context, "parsed entry");
        entries.push(entry);
    }

    if let Some(duplicate) = collation::sort_entries(&mut entries) {
        return Err(Error::DuplicateEntry {
            id: duplicate.id.clone(),
            context: duplicate.context.clone(),
        });
    }

    Ok(Catalog {
        comment,
        header,
        entries,
    })
}

struct Cursor<'a> {
    lines: Vec<&'a str>,
    position: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn is_exhausted(&self) -> bool {
        self.position >= self.lines.len()
    }

    fn file_comment(&mut self) -> Option<String> {
        let mut comment_lines = Vec::new();
        while let Some(line) = self.peek() {
            if !line.starts_with('#') {
                break;
            }
            let rest = line.trim_start_matches('#');
            if rest.is_empty() {
                comment_lines.push(String::new());
            } else if rest.starts_with(' ') {
                comment_lines.push(rest.trim().to_string());
            } else {
                break;
            }
            self.advance();
        }

        if comment_lines.is_empty() {
            None
        } else {
            Some(comment_lines.join("\n"))
        }
    }

    fn next_entry(&mut self) -> Result<Entry, Error> {
        let mut entry = Entry::default();
        let mut msgid: Option<String> = None;
        let mut msgctxt: Option<String> = None;
        let mut msgstr: Option<String> = None;
        let mut previous: Option<ContentType> = None;

        while let Some(line) = self.peek() {
            if let Some(comment) = parse_comment(line)? {
                if previous.is_some() {
                    break;
                }
                match comment {
                    Comment::Translator(content) => entry.translator_comments.push(content),
                    Comment::Extracted(content) => entry.extracted_comments.push(content),
                    Comment::References(references) => entry.references.extend(references),
                    Comment::Flags(flags) => entry.flags = entry.flags.union(flags),
                }
                self.advance();
                continue;
            }

            if let Some((content_type, value)) = parse_content(line)? {
                let slot = match content_type {
                    ContentType::Msgid => &mut msgid,
                    ContentType::Msgctxt => &mut msgctxt,
                    ContentType::Msgstr => &mut msgstr,
                };
                if slot.is_some() {
                    return Err(Error::ContentTypeRedefined(content_type.keyword()));
                }
                *slot = Some(value);
                previous = Some(content_type);
                self.advance();
                continue;
            }

            if let Some(value) = parse_continuation(line)? {
                let slot = match previous {
                    Some(ContentType::Msgid) => &mut msgid,
                    Some(ContentType::Msgctxt) => &mut msgctxt,
                    Some(ContentType::Msgstr) => &mut msgstr,
                    None => return Err(Error::UnknownLine(line.to_string())),
                };
                slot.get_or_insert_with(String::new).push_str(&value);
                self.advance();
                continue;
            }

            return Err(Error::UnknownLine(line.to_string()));
        }

        entry.id = msgid.ok_or(Error::ContentTypeMissing("msgid"))?;
        entry.string = msgstr.ok_or(Error::ContentTypeMissing("msgstr"))?;
        entry.context = msgctxt;
        Ok(entry)
    }
}

fn parse_comment(line: &str) -> Result<Option<Comment>, Error> {
    let Some(captures) = COMMENT_LINE.captures(line) else {
        return Ok(None);
    };
    let content = &captures[2];

    let comment = match &captures[1] {
        " " => Comment::Translator(content.to_string()),
        "." => Comment::Extracted(content.to_string()),
        ":" => Comment::References(parse_references(content)?),
        _ => Comment::Flags(parse_flags(line, content)?),
    };
    Ok(Some(comment))
}

fn parse_flags(line: &str, content: &str) -> Result<Flags, Error> {
    let tokens = FLAG_SEPARATOR
        .split(content)
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>();
    if tokens.is_empty() {
        return Err(Error::EmptyFlag(line.to_string()));
    }

    tokens
        .into_iter()
        .map(|token| match token {
            "c-format" => Ok(Flag::CFormat),
            "fuzzy" => Ok(Flag::Fuzzy),
            other => Err(Error::UnknownFlag(other.to_string())),
        })
        .collect()
}

fn parse_references(content: &str) -> Result<Vec<Reference>, Error> {
    content
        .split_whitespace()
        .map(|token| match NUMBERED_REFERENCE.captures(token) {
            Some(captures) => {
                let line_number = captures[2]
                    .parse::<u32>()
                    .map_err(|_| Error::BadReference(token.to_string()))?;
                Ok(Reference::new(&captures[1], Some(line_number)))
            }
            None => Ok(Reference::new(token, None)),
        })
        .collect()
}

fn parse_content(line: &str) -> Result<Option<(ContentType, String)>, Error> {
    let Some(captures) = CONTENT_LINE.captures(line) else {
        return Ok(None);
    };
    let content_type = ContentType::from_keyword(&captures[1])
        .ok_or_else(|| Error::UnknownContentType(line.to_string()))?;
    let raw = &captures[2];
    let value = unescape(raw).ok_or_else(|| Error::bad_content(raw))?;
    Ok(Some((content_type, value)))
}

fn parse_continuation(line: &str) -> Result<Option<String>, Error> {
    let Some(captures) = CONTINUATION_LINE.captures(line) else {
        return Ok(None);
    };
    let raw = &captures[1];
    unescape(raw).map(Some).ok_or_else(|| Error::bad_content(raw))
}

impl Catalog {
    /// Parses a catalog (translations allowed) from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        parse_catalog(bytes, &ParseOptions::new())
    }

    /// Reads and parses a file through the given file system.
    pub fn read_with<F: FileSystem>(
        fs: &F,
        path: &Path,
        options: &ParseOptions,
    ) -> Result<Self, Error> {
        let bytes = fs.read_bytes(path)?;
        let catalog = parse_catalog(&bytes, options)?;
        tracing::debug!(
            path = %path.display(),
            entries = catalog.entries.len(),
            "read catalog"
        );
        Ok(catalog)
    }

    /// Reads a PO catalog from disk.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::read_with(&LocalFileSystem, path.as_ref(), &ParseOptions::new())
    }

    /// Reads a POT template from disk, rejecting translated entries.
    pub fn read_template<P: AsRef<Path>>(path: P) -> Result<Template, Error> {
        Self::read_with(&LocalFileSystem, path.as_ref(), &ParseOptions::template())
    }
}

impl FromStr for Catalog {
    type Err = Error;

    /// Parses a catalog (translations allowed) from a string.
    fn from_str(text: &str) -> Result<Self, Error> {
        parse_str(text, &ParseOptions::new())
    }
}
