//! Seams between the catalog core and the outside world.
//!
//! The extractor and writer only touch the disk through [`FileSystem`], and
//! the backfill only reaches the transliteration service through
//! [`Converter`]. Both come with a default implementation.

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::error::Error;

/// One item of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub is_directory: bool,
}

/// Directory listing, whole-file reads and whole-file writes.
///
/// # Example
///
/// ```rust,no_run
/// use pocatalog::traits::{FileSystem, LocalFileSystem};
/// let fs = LocalFileSystem;
/// for entry in fs.list("apple".as_ref())? {
///     println!("{} {}", entry.path.display(), entry.is_directory);
/// }
/// # Ok::<(), pocatalog::Error>(())
/// ```
pub trait FileSystem {
    /// Lists the direct children of a directory.
    fn list(&self, path: &Path) -> Result<Vec<DirEntry>, Error>;

    /// Reads a whole file.
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, Error>;

    /// Writes a whole file. With `fail_if_exists`, an existing file is left
    /// untouched and an [`std::io::ErrorKind::AlreadyExists`] error returned.
    fn write_bytes(&self, path: &Path, bytes: &[u8], fail_if_exists: bool) -> Result<(), Error>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn list(&self, path: &Path) -> Result<Vec<DirEntry>, Error> {
        let enumeration = |source| Error::Enumeration {
            path: path.to_path_buf(),
            source,
        };

        let mut entries = Vec::new();
        for item in fs::read_dir(path).map_err(enumeration)? {
            let item = item.map_err(enumeration)?;
            let is_directory = item.file_type().map_err(Error::Io)?.is_dir();
            entries.push(DirEntry {
                path: item.path(),
                is_directory,
            });
        }
        Ok(entries)
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, Error> {
        fs::read(path).map_err(Error::Io)
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8], fail_if_exists: bool) -> Result<(), Error> {
        if fail_if_exists {
            let file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(path)?;
            fill_new_file(path, file, bytes)
        } else {
            fs::write(path, bytes).map_err(Error::Io)
        }
    }
}

// A freshly created file that cannot be filled is removed again.
fn fill_new_file<W: Write>(path: &Path, mut file: W, bytes: &[u8]) -> Result<(), Error> {
    match file.write_all(bytes).and_then(|()| file.flush()) {
        Ok(()) => Ok(()),
        Err(err) => {
            drop(file);
            let _ = fs::remove_file(path);
            Err(Error::Io(err))
        }
    }
}

/// The variant-script conversion service used to backfill translations.
///
/// Any `Fn(&str) -> String` is a converter.
pub trait Converter {
    fn convert(&self, text: &str) -> Result<String, Error>;
}

impl<F> Converter for F
where
    F: Fn(&str) -> String,
{
    fn convert(&self, text: &str) -> Result<String, Error> {
        Ok(self(text))
    }
}
