use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::entry::{EntryKind, EntryRecord, FileAttributes};
use crate::traits::MetadataDecoder;

/// One value yielded by a [`Traversal`](crate::Traversal).
///
/// Which variant appears is fixed by the
/// [`OutputShape`](crate::OutputShape) chosen on the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    /// [`OutputShape::Path`](crate::OutputShape::Path)
    Path(PathBuf),

    /// [`OutputShape::Metadata`](crate::OutputShape::Metadata)
    Info(EntryInfo),

    /// [`OutputShape::Handle`](crate::OutputShape::Handle), file entries.
    File(FileInfo),

    /// [`OutputShape::Handle`](crate::OutputShape::Handle), directory entries.
    Directory(DirectoryInfo),
}

impl Found {
    /// Full path of the entry, whatever the shape.
    pub fn path(&self) -> &Path {
        match self {
            Self::Path(p) => p,
            Self::Info(info) => &info.full_path,
            Self::File(f) => &f.info.full_path,
            Self::Directory(d) => &d.info.full_path,
        }
    }

    pub fn into_path(self) -> PathBuf {
        match self {
            Self::Path(p) => p,
            Self::Info(info) => info.full_path,
            Self::File(f) => f.info.full_path,
            Self::Directory(d) => d.info.full_path,
        }
    }
}

/// Decoded metadata of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Base name.
    pub name: OsString,

    /// Full path, in the form selected by `as_long_path`.
    pub full_path: PathBuf,

    pub attributes: FileAttributes,

    /// Size in bytes. Zero for directories.
    pub size: u64,

    pub created: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
    pub modified: Option<SystemTime>,
}

impl EntryInfo {
    pub fn kind(&self) -> EntryKind {
        EntryKind::of(self.attributes)
    }

    pub fn is_directory(&self) -> bool {
        self.kind() == EntryKind::Directory
    }

    pub fn is_reparse_point(&self) -> bool {
        self.attributes.contains(FileAttributes::REPARSE_POINT)
    }

    pub fn is_hidden(&self) -> bool {
        self.attributes.contains(FileAttributes::HIDDEN)
    }

    pub fn is_readonly(&self) -> bool {
        self.attributes.contains(FileAttributes::READONLY)
    }
}

/// A file entry together with the directory it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub info: EntryInfo,
    pub parent: PathBuf,
}

impl FileInfo {
    pub fn len(&self) -> u64 {
        self.info.size
    }

    pub fn is_empty(&self) -> bool {
        self.info.size == 0
    }
}

/// A directory entry together with the directory it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryInfo {
    pub info: EntryInfo,
    pub parent: PathBuf,
}

/// Copies the raw record into an [`EntryInfo`] unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdMetadataDecoder;

impl MetadataDecoder for StdMetadataDecoder {
    fn decode(&self, record: &EntryRecord, full_path: &Path) -> EntryInfo {
        EntryInfo {
            name: record.name.clone(),
            full_path: full_path.to_path_buf(),
            attributes: record.attributes,
            size: record.size,
            created: record.created,
            accessed: record.accessed,
            modified: record.modified,
        }
    }
}
