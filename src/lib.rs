//! # fsenum
//!
//! Lazy, queue-driven file system enumeration with find-first/find-next
//! semantics.
//!
//! fsenum owns the traversal engine: the breadth-first directory queue, the
//! open → iterate → close protocol around each native search, the filtering
//! of every raw entry, and the policy for directories that fail. It does
//! **not** own path canonicalization or metadata decoding beyond the
//! defaults. Those sit behind the [`PathResolver`] and [`MetadataDecoder`]
//! contracts, and the enumeration primitive itself behind [`NativeFind`].
//!
//! # Quick Start
//!
//! ```rust
//! use std::fs;
//!
//! let dir = tempfile::tempdir().unwrap();
//! fs::write(dir.path().join("a.txt"), "a").unwrap();
//! fs::create_dir(dir.path().join("sub")).unwrap();
//! fs::write(dir.path().join("sub").join("b.txt"), "b").unwrap();
//! fs::write(dir.path().join("sub").join("c.md"), "c").unwrap();
//!
//! let mut names: Vec<String> = fsenum::enumerate(dir.path())
//!     .recursive(true)
//!     .search_pattern("*.txt")
//!     .build()
//!     .unwrap()
//!     .map(|found| {
//!         let found = found.unwrap();
//!         found.path().file_name().unwrap().to_string_lossy().into_owned()
//!     })
//!     .collect();
//! names.sort();
//!
//! assert_eq!(names, ["a.txt", "b.txt"]);
//! ```
//!
//! # Output shapes
//!
//! [`OutputShape`] picks what each step yields: the path, a decoded
//! [`EntryInfo`], or a typed [`FileInfo`] / [`DirectoryInfo`]. Asking for
//! `Handle(HandleKind::Directory)` leaves files out without touching the
//! include flags.
//!
//! ```rust
//! use fsenum::{Found, HandleKind, OutputShape};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::create_dir(dir.path().join("logs")).unwrap();
//! std::fs::write(dir.path().join("readme"), "hi").unwrap();
//!
//! let found: Vec<Found> = fsenum::enumerate(dir.path())
//!     .output(OutputShape::Handle(HandleKind::Directory))
//!     .build()
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(found.len(), 1);
//! assert!(matches!(&found[0], Found::Directory(d) if d.info.name == "logs"));
//! ```
//!
//! # Failure policy
//!
//! By default the first failure ends the traversal and is yielded as
//! `Err`. With [`continue_on_exception`](EnumerationBuilder::continue_on_exception)
//! every directory that cannot be opened or read contributes nothing and the
//! walk goes on. An empty result and an aborted traversal are never the same
//! thing: the latter always yields exactly one `Err`.

#![deny(unsafe_code)]

pub mod matcher;

mod builder;
mod engine;
mod entry;
mod error;
mod handle;
mod native;
mod options;
mod output;
mod path;
mod platform;
mod projector;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::EnumerationBuilder;
pub use engine::{Traversal, TraversalState};
pub use entry::{EntryKind, EntryRecord, FileAttributes};
pub use error::EnumError;
pub use handle::{DirectoryHandle, HandlePolicy, HandleState};
pub use native::{FindQuery, FindScope, StdFind, Transaction};
pub use options::{EnumerationOptions, HandleKind, OutputShape};
pub use output::{DirectoryInfo, EntryInfo, FileInfo, Found, StdMetadataDecoder};
pub use path::StdPathResolver;
pub use traits::{Matcher, MetadataDecoder, NativeFind, NativeSearch, PathResolver};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`EnumerationBuilder`] rooted at `root`.
///
/// # Example
///
/// ```rust
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("one.txt"), "1").unwrap();
///
/// let paths: Vec<_> = fsenum::enumerate(dir.path())
///     .build()
///     .unwrap()
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(paths.len(), 1);
/// ```
pub fn enumerate(root: impl Into<std::path::PathBuf>) -> EnumerationBuilder {
    EnumerationBuilder::new(root)
}
