use std::io;
use std::path::{Path, PathBuf};

use crate::entry::EntryRecord;
use crate::error::EnumError;
use crate::native::FindQuery;
use crate::output::EntryInfo;

/// The host's "find first / find next" enumeration primitive.
///
/// Implement this to enumerate anything that behaves like a directory tree:
/// the real file system ([`StdFind`](crate::StdFind)), an in-memory fake for
/// tests, or a platform-specific API with richer find data.
///
/// # Object Safety
///
/// `NativeFind` is object-safe. The engine stores it as `Arc<dyn NativeFind>`,
/// so `find_first()` returns a boxed [`NativeSearch`].
///
/// # Errors
///
/// Return the raw `io::Error` from the platform call. The engine classifies
/// it by [`io::ErrorKind`] into an [`EnumError`]; numeric OS codes never cross
/// the crate boundary.
pub trait NativeFind: Send + Sync {
    /// Open a search described by `query`.
    ///
    /// For [`FindScope::Children`](crate::FindScope::Children) the search
    /// lists the contents of `query.path` (the `path\*` addressing). For
    /// [`FindScope::Entry`](crate::FindScope::Entry) it reports exactly the
    /// entry at `query.path`.
    fn find_first(&self, query: &FindQuery<'_>) -> io::Result<Box<dyn NativeSearch>>;
}

/// An open native search.
///
/// Owned by exactly one [`DirectoryHandle`](crate::DirectoryHandle), which
/// calls [`close`](NativeSearch::close) once, whether or not the search was
/// read to the end.
pub trait NativeSearch {
    /// Advance to the next entry.
    ///
    /// `Ok(None)` is the "no more files" terminal condition. Any other
    /// terminal condition is an `Err`.
    fn next_entry(&mut self) -> io::Result<Option<EntryRecord>>;

    /// Release the native resource. Called exactly once.
    fn close(&mut self) {}
}

/// Turns caller-supplied paths into the absolute, long-path-safe form the
/// engine hands to [`NativeFind`].
pub trait PathResolver: Send + Sync {
    /// Resolve `path`. Fails with [`EnumError::InvalidPath`].
    fn resolve(&self, path: &Path) -> Result<PathBuf, EnumError>;

    /// The regular (non long-path) spelling of a resolved path, used for
    /// output unless long paths were requested.
    fn regular_form(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}

/// Builds a full metadata record from a raw native record.
pub trait MetadataDecoder: Send + Sync {
    fn decode(&self, record: &EntryRecord, full_path: &Path) -> EntryInfo;
}

/// Decides whether an entry name passes the name filter.
///
/// The engine only ever builds these through
/// [`matcher::compile`](crate::matcher::compile).
///
/// # Example
///
/// ```rust
/// use fsenum::matcher::compile;
///
/// let m = compile("*.txt").unwrap();
/// assert!(m.is_match("Notes.TXT"));
/// assert!(!m.is_match("notes.md"));
/// ```
pub trait Matcher: Send + Sync {
    /// Returns `true` if an entry with this base name should be yielded.
    fn is_match(&self, name: &str) -> bool;
}
