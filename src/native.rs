//! The native enumeration seam and its standard-library backend.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::entry::{EntryRecord, FileAttributes};
use crate::traits::{NativeFind, NativeSearch};

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// What a [`FindQuery`] addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindScope {
    /// Every entry inside the directory at `path` (`path\*`).
    Children,

    /// The single entry at `path` itself.
    Entry,
}

/// Opaque handle of an OS-level transaction.
///
/// The engine never looks inside it; the value is forwarded verbatim to every
/// native call so a transacted backend can route through its transacted
/// primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transaction {
    raw: usize,
}

impl Transaction {
    pub fn from_raw(raw: usize) -> Self {
        Self { raw }
    }

    pub fn as_raw(&self) -> usize {
        self.raw
    }
}

/// Arguments of one native "find first" call.
#[derive(Debug, Clone, Copy)]
pub struct FindQuery<'a> {
    /// Target path, with trailing separators already stripped.
    pub path: &'a Path,
    pub scope: FindScope,
    pub transaction: Option<&'a Transaction>,

    /// Ask the backend for a larger fetch buffer. Advisory.
    pub large_fetch: bool,

    /// The caller will discard files; a backend may limit the search to
    /// directories. Advisory, the engine still filters.
    pub directories_only: bool,
}

// ---------------------------------------------------------------------------
// StdFind
// ---------------------------------------------------------------------------

/// [`NativeFind`] over `std::fs::read_dir`.
///
/// - Symbolic links are reported as reparse points. A link whose target is a
///   directory also carries the directory bit, the way native find data
///   reports directory junctions.
/// - `readdir` never produces `.` and `..`, so no pseudo-entries are emitted.
/// - Entries removed between listing and `lstat` are skipped.
/// - The fetch-size and directories-only hints are ignored.
/// - Transacted enumeration is not available; a query carrying a
///   [`Transaction`] fails with [`io::ErrorKind::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFind;

impl NativeFind for StdFind {
    fn find_first(&self, query: &FindQuery<'_>) -> io::Result<Box<dyn NativeSearch>> {
        if query.transaction.is_some() {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "transacted enumeration is not supported by the standard backend",
            ));
        }

        match query.scope {
            FindScope::Children => {
                let read_dir = fs::read_dir(query.path)?;
                Ok(Box::new(ChildSearch {
                    dir: query.path.to_path_buf(),
                    read_dir: Some(read_dir),
                }))
            }
            FindScope::Entry => {
                let name = query
                    .path
                    .file_name()
                    .map(OsStr::to_os_string)
                    .unwrap_or_else(|| query.path.as_os_str().to_os_string());
                let record = read_record(query.path, name)?;
                Ok(Box::new(SingleSearch {
                    record: Some(record),
                }))
            }
        }
    }
}

struct ChildSearch {
    dir: PathBuf,
    read_dir: Option<fs::ReadDir>,
}

impl NativeSearch for ChildSearch {
    fn next_entry(&mut self) -> io::Result<Option<EntryRecord>> {
        let Some(read_dir) = self.read_dir.as_mut() else {
            return Ok(None);
        };

        for entry in read_dir {
            let entry = entry?;
            match read_record(&entry.path(), entry.file_name()) {
                Ok(record) => return Ok(Some(record)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    trace!(dir = ?self.dir, name = ?entry.file_name(), "entry vanished during enumeration");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    fn close(&mut self) {
        self.read_dir = None;
    }
}

struct SingleSearch {
    record: Option<EntryRecord>,
}

impl NativeSearch for SingleSearch {
    fn next_entry(&mut self) -> io::Result<Option<EntryRecord>> {
        Ok(self.record.take())
    }

    fn close(&mut self) {
        self.record = None;
    }
}

// ---------------------------------------------------------------------------
// Record construction
// ---------------------------------------------------------------------------

fn read_record(path: &Path, name: OsString) -> io::Result<EntryRecord> {
    let meta = fs::symlink_metadata(path)?;
    let mut attributes = attributes_of(&meta, &name);

    if meta.file_type().is_symlink() {
        attributes |= FileAttributes::REPARSE_POINT;
        if fs::metadata(path).map(|target| target.is_dir()).unwrap_or(false) {
            attributes |= FileAttributes::DIRECTORY;
        }
    }
    if attributes.is_empty() {
        attributes = FileAttributes::NORMAL;
    }

    Ok(EntryRecord {
        name,
        attributes,
        size: if attributes.contains(FileAttributes::DIRECTORY) { 0 } else { meta.len() },
        created: meta.created().ok(),
        accessed: meta.accessed().ok(),
        modified: meta.modified().ok(),
    })
}

#[cfg(windows)]
fn attributes_of(meta: &fs::Metadata, _name: &OsStr) -> FileAttributes {
    use std::os::windows::fs::MetadataExt;
    FileAttributes::from_bits_retain(meta.file_attributes())
}

#[cfg(not(windows))]
fn attributes_of(meta: &fs::Metadata, name: &OsStr) -> FileAttributes {
    let mut attributes = FileAttributes::empty();
    if meta.is_dir() {
        attributes |= FileAttributes::DIRECTORY;
    }
    if meta.permissions().readonly() {
        attributes |= FileAttributes::READONLY;
    }
    if name.as_encoded_bytes().first() == Some(&b'.') {
        attributes |= FileAttributes::HIDDEN;
    }
    attributes
}
