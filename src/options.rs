/// Which value a traversal yields for each accepted entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputShape {
    /// The full path.
    #[default]
    Path,

    /// A decoded [`EntryInfo`](crate::EntryInfo).
    Metadata,

    /// A [`FileInfo`](crate::FileInfo) or [`DirectoryInfo`](crate::DirectoryInfo).
    /// Entries of the other kind are left out when `HandleKind` names one.
    Handle(HandleKind),
}

/// Restricts [`OutputShape::Handle`] to one kind of entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleKind {
    #[default]
    Any,
    File,
    Directory,
}

/// Immutable traversal configuration.
///
/// Built through [`EnumerationBuilder`](crate::EnumerationBuilder); the
/// derived values below are computed once and never change mid-traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationOptions {
    pub recursive: bool,
    pub skip_reparse_points: bool,
    pub continue_on_exception: bool,
    pub include_files: bool,
    pub include_directories: bool,
    pub search_pattern: String,
    pub large_fetch: bool,
    pub as_long_path: bool,
    pub output: OutputShape,
}

impl Default for EnumerationOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            skip_reparse_points: false,
            continue_on_exception: false,
            include_files: true,
            include_directories: true,
            search_pattern: "*".to_string(),
            large_fetch: false,
            as_long_path: false,
            output: OutputShape::Path,
        }
    }
}

impl EnumerationOptions {
    /// `(files, directories)` after applying "neither means both".
    pub fn effective_includes(&self) -> (bool, bool) {
        if !self.include_files && !self.include_directories {
            (true, true)
        } else {
            (self.include_files, self.include_directories)
        }
    }

    /// No file can ever be yielded, so the native search may skip them.
    pub fn directories_only(&self) -> bool {
        let (files, _) = self.effective_includes();
        !files || self.output == OutputShape::Handle(HandleKind::Directory)
    }

    /// Only files can be yielded; a missing target is a missing file.
    pub fn file_mode(&self) -> bool {
        let (_, dirs) = self.effective_includes();
        !dirs || self.output == OutputShape::Handle(HandleKind::File)
    }
}
