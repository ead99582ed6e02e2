use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::entry::EntryRecord;
use crate::error::EnumError;
use crate::native::FindQuery;
use crate::platform::CriticalErrorGuard;
use crate::traits::{NativeFind, NativeSearch};

/// How a [`DirectoryHandle`] reports failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandlePolicy {
    /// End the search silently when iteration fails instead of returning
    /// [`EnumError::EnumerationFailed`].
    pub continue_on_exception: bool,

    /// Report a missing target as [`EnumError::FileNotFound`] instead of
    /// [`EnumError::PathNotFound`].
    pub file_mode: bool,
}

/// Lifecycle of a [`DirectoryHandle`]. There is no way back to `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    Open,
    /// Read to the end (or ended by a swallowed failure). The native search is
    /// already released.
    Exhausted,
    Closed,
}

/// One open native search, read entry by entry.
///
/// The native search is released exactly once: when iteration reaches the
/// end, on [`close`](DirectoryHandle::close), or on drop, whichever comes
/// first.
pub struct DirectoryHandle {
    path: PathBuf,
    search: Option<Box<dyn NativeSearch>>,
    state: HandleState,
    policy: HandlePolicy,
}

impl DirectoryHandle {
    /// Issue the native "find first" call for `query`.
    ///
    /// Trailing separators are stripped from `query.path` first; the native
    /// primitive does not accept them.
    pub fn open(
        native: &dyn NativeFind,
        query: FindQuery<'_>,
        policy: HandlePolicy,
    ) -> Result<Self, EnumError> {
        let path = strip_trailing_separators(query.path);
        let query = FindQuery { path: &path, ..query };

        trace!(path = ?path, scope = ?query.scope, "opening native search");
        let opened = {
            let _guard = CriticalErrorGuard::suppress();
            native.find_first(&query)
        };

        match opened {
            Ok(search) => Ok(Self {
                path,
                search: Some(search),
                state: HandleState::Open,
                policy,
            }),
            Err(error) => Err(classify_open_error(error, path, policy)),
        }
    }

    /// The directory (or entry) this handle was opened on.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    /// Release the native search. Safe to call any number of times.
    pub fn close(&mut self) {
        self.release();
        if self.state == HandleState::Open {
            self.state = HandleState::Closed;
        }
    }

    fn release(&mut self) {
        if let Some(mut search) = self.search.take() {
            search.close();
            trace!(path = ?self.path, "native search closed");
        }
    }

    fn finish(&mut self) {
        self.release();
        self.state = HandleState::Exhausted;
    }
}

impl Iterator for DirectoryHandle {
    type Item = Result<EntryRecord, EnumError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != HandleState::Open {
            return None;
        }
        let search = self.search.as_mut()?;

        let step = {
            let _guard = CriticalErrorGuard::suppress();
            search.next_entry()
        };

        match step {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finish();
                None
            }
            Err(error) => {
                self.finish();
                if self.policy.continue_on_exception {
                    debug!(path = ?self.path, %error, "enumeration of directory ended early");
                    None
                } else {
                    Some(Err(EnumError::EnumerationFailed {
                        path: self.path.clone(),
                        source: error,
                    }))
                }
            }
        }
    }
}

impl Drop for DirectoryHandle {
    fn drop(&mut self) {
        self.close();
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a failed "find first" onto the crate's error kinds.
fn classify_open_error(error: io::Error, path: PathBuf, policy: HandlePolicy) -> EnumError {
    match error.kind() {
        io::ErrorKind::NotFound if policy.file_mode => EnumError::FileNotFound(path),
        io::ErrorKind::NotFound => EnumError::PathNotFound(path),
        io::ErrorKind::NotADirectory => EnumError::NotADirectory(path),
        io::ErrorKind::PermissionDenied => EnumError::AccessDenied(path),
        _ => EnumError::EnumerationFailed {
            path,
            source: error,
        },
    }
}

/// Drop trailing separators while keeping a bare root (`/`, `C:\`) intact.
fn strip_trailing_separators(path: &Path) -> PathBuf {
    path.components().collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::entry::FileAttributes;
    use crate::native::FindScope;

    /// Hands out searches over a fixed listing and counts native closes.
    #[derive(Default)]
    struct Counting {
        closes: Arc<AtomicUsize>,
    }

    impl Counting {
        fn closes(&self) -> usize {
            self.closes.load(Ordering::SeqCst)
        }
    }

    impl NativeFind for Counting {
        fn find_first(&self, _query: &FindQuery<'_>) -> io::Result<Box<dyn NativeSearch>> {
            Ok(Box::new(CountingSearch {
                records: vec![
                    EntryRecord::new("a", FileAttributes::ARCHIVE),
                    EntryRecord::new("b", FileAttributes::ARCHIVE),
                ],
                closes: Arc::clone(&self.closes),
            }))
        }
    }

    struct CountingSearch {
        records: Vec<EntryRecord>,
        closes: Arc<AtomicUsize>,
    }

    impl NativeSearch for CountingSearch {
        fn next_entry(&mut self) -> io::Result<Option<EntryRecord>> {
            Ok(self.records.pop())
        }

        fn close(&mut self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn open_on(native: &Counting) -> DirectoryHandle {
        let query = FindQuery {
            path: Path::new("/d"),
            scope: FindScope::Children,
            transaction: None,
            large_fetch: false,
            directories_only: false,
        };
        DirectoryHandle::open(native, query, HandlePolicy::default()).unwrap()
    }

    #[test]
    fn close_is_idempotent() {
        let native = Counting::default();
        let mut handle = open_on(&native);
        assert_eq!(handle.state(), HandleState::Open);

        handle.close();
        handle.close();
        assert_eq!(handle.state(), HandleState::Closed);
        assert_eq!(native.closes(), 1);
        assert!(handle.next().is_none());

        drop(handle);
        assert_eq!(native.closes(), 1);
    }

    #[test]
    fn reading_to_the_end_exhausts_the_handle() {
        let native = Counting::default();
        let mut handle = open_on(&native);

        let names: Vec<String> = handle
            .by_ref()
            .map(|r| r.unwrap().name.into_string().unwrap())
            .collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(handle.state(), HandleState::Exhausted);
        assert_eq!(native.closes(), 1);

        handle.close();
        assert_eq!(handle.state(), HandleState::Exhausted);
        drop(handle);
        assert_eq!(native.closes(), 1);
    }

    #[test]
    fn trailing_separators_are_stripped() {
        assert_eq!(strip_trailing_separators(Path::new("/r/sub/")), Path::new("/r/sub"));
        assert_eq!(strip_trailing_separators(Path::new("/r/sub//")), Path::new("/r/sub"));
        assert_eq!(strip_trailing_separators(Path::new("/r")), Path::new("/r"));
    }

    #[test]
    fn bare_root_survives_stripping() {
        assert_eq!(strip_trailing_separators(Path::new("/")), Path::new("/"));
    }

    #[test]
    fn not_found_depends_on_mode() {
        let dir_mode = HandlePolicy::default();
        let file_mode = HandlePolicy { file_mode: true, ..HandlePolicy::default() };

        let err = classify_open_error(io::ErrorKind::NotFound.into(), "/x".into(), dir_mode);
        assert!(matches!(err, EnumError::PathNotFound(_)));

        let err = classify_open_error(io::ErrorKind::NotFound.into(), "/x".into(), file_mode);
        assert!(matches!(err, EnumError::FileNotFound(_)));
    }

    #[test]
    fn other_kinds_are_classified() {
        let policy = HandlePolicy::default();
        let err = classify_open_error(io::ErrorKind::PermissionDenied.into(), "/x".into(), policy);
        assert!(matches!(err, EnumError::AccessDenied(_)));

        let err = classify_open_error(io::ErrorKind::NotADirectory.into(), "/x".into(), policy);
        assert!(matches!(err, EnumError::NotADirectory(_)));

        let err = classify_open_error(io::ErrorKind::Unsupported.into(), "/x".into(), policy);
        assert!(matches!(err, EnumError::EnumerationFailed { .. }));
    }
}
