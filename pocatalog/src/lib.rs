#![forbid(unsafe_code)]
//! Gettext PO catalog toolkit for Rust.
//!
//! Parses and writes PO/POT files deterministically, extracts localizable
//! strings from Apple, Android and Windows source trees, and merges them into
//! one template.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use pocatalog::{Catalog, LocalFileSystem, WriteOptions, merge::extract_strings, writer};
//!
//! // Refresh a template from the three source trees
//! let template = Catalog::read_template("po/messages.pot")?;
//! let entries = extract_strings(
//!     &LocalFileSystem,
//!     Path::new("apple"),
//!     Path::new("android"),
//!     Path::new("windows"),
//! )?;
//! writer::update_template(&template, entries, &WriteOptions::new(), "po/messages.pot")?;
//!
//! // Bring a translation in line with the template
//! let catalog = Catalog::read_from("po/fr.po")?;
//! let template = Catalog::read_template("po/messages.pot")?;
//! writer::update_catalog(&catalog, &template, &WriteOptions::new(), "po/fr.po")?;
//! # Ok::<(), pocatalog::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`escape`]: PO string-literal escaping
//! - [`parser`] and [`writer`]: the PO grammar in both directions
//! - [`extractor`] and [`merge`]: template generation from source code
//! - [`backfill`]: filling one locale from another through a [`Converter`]
//!
//! Output is byte-stable: formatting a parsed catalog again gives the same
//! text, and entries are always kept in one locale-aware order.

pub mod backfill;
pub mod collation;
pub mod error;
pub mod escape;
pub mod extractor;
pub mod merge;
pub mod options;
pub mod parser;
pub mod traits;
pub mod types;
pub mod writer;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    options::{DEFAULT_LINE_WIDTH, ParseOptions, WriteOptions},
    parser::parse_catalog,
    traits::{Converter, DirEntry, FileSystem, LocalFileSystem},
    types::{Catalog, Entry, Flag, Flags, Reference, Template},
};
