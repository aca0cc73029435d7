//! All error types for the pocatalog crate.
//!
//! Every fallible operation (parsing, writing, extraction, backfill) returns
//! [`Error`]. Nothing in the crate recovers from these; the caller is expected
//! to report the error and stop.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot enumerate directory `{}`: {source}", .path.display())]
    Enumeration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("content is not valid UTF-8")]
    Encoding,

    #[error("unknown line `{0}`")]
    UnknownLine(String),

    #[error("unknown content type in line `{0}`")]
    UnknownContentType(String),

    #[error("`{0}` is defined more than once in one entry")]
    ContentTypeRedefined(&'static str),

    #[error("entry is missing `{0}`")]
    ContentTypeMissing(&'static str),

    #[error("unknown flag `{0}`")]
    UnknownFlag(String),

    #[error("empty flag list in line `{0}`")]
    EmptyFlag(String),

    #[error("invalid reference `{0}`")]
    BadReference(String),

    #[error("missing header entry")]
    MissingHeader,

    #[error("template entry `{0}` has a non-empty translation")]
    NonEmptyStringInTemplate(String),

    #[error("duplicate entry `{id}`{}", context_suffix(.context))]
    DuplicateEntry { id: String, context: Option<String> },

    #[error("cannot decode escaped content `{content}`")]
    BadContent { content: String },

    #[error("conversion error: {message}")]
    Conversion {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Creates a new conversion error with optional source error
    pub fn conversion_error(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Conversion {
            message: message.into(),
            source,
        }
    }

    pub(crate) fn bad_content(content: impl Into<String>) -> Self {
        Error::BadContent {
            content: content.into(),
        }
    }

    /// Returns `true` for errors raised by the PO grammar rather than by I/O.
    pub fn is_grammar_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownLine(_)
                | Error::UnknownContentType(_)
                | Error::ContentTypeRedefined(_)
                | Error::ContentTypeMissing(_)
                | Error::UnknownFlag(_)
                | Error::EmptyFlag(_)
                | Error::BadReference(_)
                | Error::MissingHeader
                | Error::NonEmptyStringInTemplate(_)
                | Error::DuplicateEntry { .. }
        )
    }
}

fn context_suffix(context: &Option<String>) -> String {
    context
        .as_ref()
        .map(|c| format!(" (context `{c}`)"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
        assert!(!error.is_grammar_error());
    }

    #[test]
    fn test_enumeration_error_names_path() {
        let error = Error::Enumeration {
            path: PathBuf::from("apple/Sources"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let display = error.to_string();
        assert!(display.contains("apple/Sources"));
        assert!(display.contains("denied"));
    }

    #[test]
    fn test_duplicate_entry_display() {
        let error = Error::DuplicateEntry {
            id: "Open".to_string(),
            context: None,
        };
        assert_eq!(error.to_string(), "duplicate entry `Open`");

        let error = Error::DuplicateEntry {
            id: "Open".to_string(),
            context: Some("menu".to_string()),
        };
        assert_eq!(error.to_string(), "duplicate entry `Open` (context `menu`)");
        assert!(error.is_grammar_error());
    }

    #[test]
    fn test_content_type_errors() {
        assert_eq!(
            Error::ContentTypeRedefined("msgid").to_string(),
            "`msgid` is defined more than once in one entry"
        );
        assert_eq!(
            Error::ContentTypeMissing("msgstr").to_string(),
            "entry is missing `msgstr`"
        );
    }

    #[test]
    fn test_bad_content_keeps_raw_text() {
        let error = Error::bad_content(r"\u12");
        assert_eq!(error.to_string(), r"cannot decode escaped content `\u12`");
        assert!(!error.is_grammar_error());
    }

    #[test]
    fn test_conversion_error_with_source() {
        let source_error = Box::new(io::Error::new(io::ErrorKind::NotFound, "Source error"));
        let error = Error::conversion_error("Conversion failed", Some(source_error));
        assert!(
            error
                .to_string()
                .contains("conversion error: Conversion failed")
        );
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnknownFlag("no-c-format".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownFlag"));
        assert!(debug.contains("no-c-format"));
    }
}
