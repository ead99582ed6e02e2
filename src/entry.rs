use std::ffi::{OsStr, OsString};
use std::time::SystemTime;

use bitflags::bitflags;

bitflags! {
    /// Attribute bits reported by the native enumeration call.
    ///
    /// Values follow the Windows `FILE_ATTRIBUTE_*` layout so raw find data can
    /// be carried over unchanged. Other platforms synthesize the subset they can
    /// observe.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FileAttributes: u32 {
        const READONLY            = 0x0000_0001;
        const HIDDEN              = 0x0000_0002;
        const SYSTEM              = 0x0000_0004;
        const DIRECTORY           = 0x0000_0010;
        const ARCHIVE             = 0x0000_0020;
        const DEVICE              = 0x0000_0040;
        const NORMAL              = 0x0000_0080;
        const TEMPORARY           = 0x0000_0100;
        const SPARSE_FILE         = 0x0000_0200;
        const REPARSE_POINT       = 0x0000_0400;
        const COMPRESSED          = 0x0000_0800;
        const OFFLINE             = 0x0000_1000;
        const NOT_CONTENT_INDEXED = 0x0000_2000;
        const ENCRYPTED           = 0x0000_4000;
    }
}

/// One raw result of a native "find next" step.
///
/// Produced fresh for every step and never retained by the engine past the
/// iteration that produced it. Everything except `name` and the
/// `DIRECTORY`/`REPARSE_POINT` bits is opaque to the traversal and only passed
/// on to the [`MetadataDecoder`](crate::MetadataDecoder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    /// Base name as reported by the native call, including the `.` and `..`
    /// pseudo-entries some platforms produce.
    pub name: OsString,

    /// Raw attribute bits.
    pub attributes: FileAttributes,

    /// Size in bytes. Zero for directories.
    pub size: u64,

    pub created: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
    pub modified: Option<SystemTime>,
}

impl EntryRecord {
    /// A record with the given name and attributes and no size or timestamps.
    pub fn new(name: impl Into<OsString>, attributes: FileAttributes) -> Self {
        Self {
            name: name.into(),
            attributes,
            size: 0,
            created: None,
            accessed: None,
            modified: None,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.attributes.contains(FileAttributes::DIRECTORY)
    }

    pub fn is_reparse_point(&self) -> bool {
        self.attributes.contains(FileAttributes::REPARSE_POINT)
    }

    /// `true` for the `.` and `..` pseudo-entries, which are never yielded.
    pub fn is_dot_entry(&self) -> bool {
        is_dot_name(&self.name)
    }
}

fn is_dot_name(name: &OsStr) -> bool {
    name == OsStr::new(".") || name == OsStr::new("..")
}

/// The kind of an enumerated entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Anything without the directory bit.
    File,

    /// A directory, including directory reparse points.
    Directory,
}

impl EntryKind {
    pub(crate) fn of(attributes: FileAttributes) -> Self {
        if attributes.contains(FileAttributes::DIRECTORY) {
            Self::Directory
        } else {
            Self::File
        }
    }
}
