use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::entry::EntryRecord;
use crate::error::EnumError;
use crate::handle::{DirectoryHandle, HandlePolicy};
use crate::native::{FindQuery, FindScope, Transaction};
use crate::options::EnumerationOptions;
use crate::output::Found;
use crate::projector::ResultProjector;
use crate::traits::{Matcher, MetadataDecoder, NativeFind, PathResolver};

// ---------------------------------------------------------------------------
// Engine parts
// ---------------------------------------------------------------------------

/// Everything the builder hands to the engine after validating inputs.
pub(crate) struct EngineParts {
    pub root:        PathBuf,
    pub options:     EnumerationOptions,
    pub transaction: Option<Transaction>,
    pub matcher:     Box<dyn Matcher>,
    pub native:      Arc<dyn NativeFind>,
    pub resolver:    Arc<dyn PathResolver>,
    pub decoder:     Arc<dyn MetadataDecoder>,
}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

/// Where a [`Traversal`] is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalState {
    /// Nothing pulled yet; the queue holds exactly the root.
    Seeded,

    /// Directories are being opened and read.
    Draining,

    /// Queue exhausted or an error was yielded. Terminal.
    Done,
}

/// Lazy, breadth-first enumeration of the entries below a root directory.
///
/// Created via [`fsenum::enumerate()`](crate::enumerate). Directories are read
/// one at a time from a FIFO queue; at most one native search is open at any
/// point, and it is closed when the directory is exhausted, when an error
/// ends the traversal, or when the `Traversal` is dropped early.
///
/// Entries of a single directory come out in native order.
///
/// # Errors
///
/// Without `continue_on_exception`, the first failure (opening the root, a
/// queued subdirectory, or reading mid-directory) is yielded as `Err` and the
/// traversal is over. With it, a failing directory simply contributes
/// nothing.
pub struct Traversal {
    root:                PathBuf,
    options:             EnumerationOptions,
    transaction:         Option<Transaction>,
    matcher:             Box<dyn Matcher>,
    native:              Arc<dyn NativeFind>,
    projector:           ResultProjector,

    // Derived once from `options`.
    policy:              HandlePolicy,
    include_files:       bool,
    include_directories: bool,
    directories_only:    bool,

    queue:   VecDeque<PathBuf>,
    current: Option<DirectoryHandle>,
    state:   TraversalState,
    yielded: usize,
}

impl Traversal {
    pub(crate) fn new(parts: EngineParts) -> Self {
        let EngineParts { root, options, transaction, matcher, native, resolver, decoder } = parts;

        let (include_files, include_directories) = options.effective_includes();
        let policy = HandlePolicy {
            continue_on_exception: options.continue_on_exception,
            file_mode:             options.file_mode(),
        };
        let projector = ResultProjector::new(options.output, options.as_long_path, decoder, resolver);

        debug!(
            root = ?root,
            recursive = options.recursive,
            pattern = %options.search_pattern,
            "enumeration seeded"
        );

        Self {
            queue: VecDeque::from([root.clone()]),
            root,
            transaction,
            matcher,
            native,
            projector,
            policy,
            include_files,
            include_directories,
            directories_only: options.directories_only(),
            options,
            current: None,
            state: TraversalState::Seeded,
            yielded: 0,
        }
    }

    /// The resolved root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &EnumerationOptions {
        &self.options
    }

    pub fn state(&self) -> TraversalState {
        self.state
    }

    /// Look up the root entry itself instead of its children.
    ///
    /// The native search addresses the root path directly, reads exactly one
    /// entry, and projects it. Independent of any iteration already done.
    ///
    /// Returns `Ok(None)` when the entry cannot be represented by the chosen
    /// typed handle, or when the lookup failed and `continue_on_exception` is
    /// set.
    pub fn get(&self) -> Result<Option<Found>, EnumError> {
        let query = self.query(&self.root, FindScope::Entry);
        let mut handle = match DirectoryHandle::open(self.native.as_ref(), query, self.policy) {
            Ok(handle) => handle,
            Err(error) if self.options.continue_on_exception => {
                debug!(path = ?self.root, %error, "lookup failed, returning nothing");
                return Ok(None);
            }
            Err(error) => return Err(error),
        };

        let record = match handle.next() {
            Some(Ok(record)) => record,
            Some(Err(error)) => return Err(error),
            None => return Ok(None),
        };
        handle.close();

        Ok(self.projector.project(&record, handle.path()))
    }

    fn query<'a>(&'a self, path: &'a Path, scope: FindScope) -> FindQuery<'a> {
        FindQuery {
            path,
            scope,
            transaction:      self.transaction.as_ref(),
            large_fetch:      self.options.large_fetch,
            directories_only: self.directories_only,
        }
    }

    /// Open the next queued directory.
    ///
    /// `None` once the queue is empty. Failures are skipped here when
    /// `continue_on_exception` is set.
    fn open_next(&mut self) -> Option<Result<(), EnumError>> {
        while let Some(dir) = self.queue.pop_front() {
            self.state = TraversalState::Draining;

            let query = self.query(&dir, FindScope::Children);
            match DirectoryHandle::open(self.native.as_ref(), query, self.policy) {
                Ok(handle) => {
                    self.current = Some(handle);
                    return Some(Ok(()));
                }
                Err(error) if self.options.continue_on_exception => {
                    debug!(path = ?dir, %error, "skipping directory");
                }
                Err(error) => return Some(Err(error)),
            }
        }
        None
    }

    /// Filtering and classification of one raw entry (dot entries are
    /// already gone). Enqueues subdirectories as a side effect.
    fn accept(&mut self, record: EntryRecord, full_path: PathBuf) -> Option<Found> {
        if self.options.skip_reparse_points && record.is_reparse_point() {
            trace!(path = ?full_path, "skipping reparse point");
            return None;
        }

        let is_directory = record.is_directory();

        // Recursion is decided before, and independently of, the yield filters.
        if is_directory && self.options.recursive {
            self.queue.push_back(full_path.clone());
        }

        if !self.matcher.is_match(&record.name.to_string_lossy()) {
            return None;
        }

        let wanted = if is_directory { self.include_directories } else { self.include_files };
        if !wanted {
            return None;
        }

        self.projector.project(&record, &full_path)
    }

    fn finish(&mut self) {
        if self.state == TraversalState::Done {
            return;
        }
        self.state = TraversalState::Done;
        self.queue.clear();
        self.current = None;
        debug!(root = ?self.root, yielded = self.yielded, "enumeration finished");
    }
}

impl Iterator for Traversal {
    type Item = Result<Found, EnumError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.state == TraversalState::Done {
                return None;
            }

            if self.current.is_none() {
                match self.open_next() {
                    Some(Ok(())) => {}
                    Some(Err(error)) => {
                        self.finish();
                        return Some(Err(error));
                    }
                    None => {
                        self.finish();
                        return None;
                    }
                }
            }

            let Some(handle) = self.current.as_mut() else {
                continue;
            };

            let (record, full_path) = match handle.next() {
                Some(Ok(record)) if record.is_dot_entry() => continue,
                Some(Ok(record)) => {
                    let full_path = handle.path().join(&record.name);
                    (record, full_path)
                }
                Some(Err(error)) => {
                    self.finish();
                    return Some(Err(error));
                }
                None => {
                    self.current = None;
                    continue;
                }
            };

            if let Some(found) = self.accept(record, full_path) {
                self.yielded += 1;
                return Some(Ok(found));
            }
        }
    }
}

impl FusedIterator for Traversal {}
