use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::entry::{EntryKind, EntryRecord};
use crate::options::{HandleKind, OutputShape};
use crate::output::{DirectoryInfo, FileInfo, Found};
use crate::traits::{MetadataDecoder, PathResolver};

/// Maps an accepted record onto the caller's [`OutputShape`].
pub(crate) struct ResultProjector {
    shape: OutputShape,
    as_long_path: bool,
    decoder: Arc<dyn MetadataDecoder>,
    resolver: Arc<dyn PathResolver>,
}

impl ResultProjector {
    pub(crate) fn new(
        shape: OutputShape,
        as_long_path: bool,
        decoder: Arc<dyn MetadataDecoder>,
        resolver: Arc<dyn PathResolver>,
    ) -> Self {
        Self {
            shape,
            as_long_path,
            decoder,
            resolver,
        }
    }

    /// `None` when a typed handle of the requested kind cannot represent
    /// the entry. That is an exclusion, not an error.
    pub(crate) fn project(&self, record: &EntryRecord, full_path: &Path) -> Option<Found> {
        let path = self.output_path(full_path);

        match self.shape {
            OutputShape::Path => Some(Found::Path(path)),
            OutputShape::Metadata => Some(Found::Info(self.decoder.decode(record, &path))),
            OutputShape::Handle(wanted) => {
                let kind = EntryKind::of(record.attributes);
                let excluded = matches!(
                    (wanted, kind),
                    (HandleKind::File, EntryKind::Directory) | (HandleKind::Directory, EntryKind::File)
                );
                if excluded {
                    return None;
                }

                let info = self.decoder.decode(record, &path);
                let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();
                Some(match kind {
                    EntryKind::File => Found::File(FileInfo { info, parent }),
                    EntryKind::Directory => Found::Directory(DirectoryInfo { info, parent }),
                })
            }
        }
    }

    fn output_path(&self, full_path: &Path) -> PathBuf {
        if self.as_long_path {
            full_path.to_path_buf()
        } else {
            self.resolver.regular_form(full_path)
        }
    }
}
