use std::path::{Path, PathBuf};

use crate::error::EnumError;
use crate::traits::PathResolver;

#[cfg(windows)]
const LONG_PREFIX: &str = r"\\?\";
#[cfg(windows)]
const LONG_UNC_PREFIX: &str = r"\\?\UNC\";
#[cfg(windows)]
const DEVICE_PREFIX: &str = r"\\.\";

/// [`PathResolver`] backed by `std::path::absolute`.
///
/// Relative paths are made absolute against the working directory. On Windows
/// the result carries the `\\?\` (or `\\?\UNC\`) prefix so the native calls are
/// not subject to `MAX_PATH`; elsewhere the long and regular forms are the same.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdPathResolver;

impl PathResolver for StdPathResolver {
    fn resolve(&self, path: &Path) -> Result<PathBuf, EnumError> {
        let raw = path.as_os_str();
        if raw.is_empty()
            || raw.as_encoded_bytes().contains(&0)
            || raw.to_string_lossy().trim().is_empty()
        {
            return Err(EnumError::InvalidPath(path.to_path_buf()));
        }

        let absolute =
            std::path::absolute(path).map_err(|_| EnumError::InvalidPath(path.to_path_buf()))?;
        Ok(to_long_form(absolute))
    }

    fn regular_form(&self, path: &Path) -> PathBuf {
        to_regular_form(path)
    }
}

#[cfg(windows)]
fn to_long_form(path: PathBuf) -> PathBuf {
    let Some(s) = path.to_str() else {
        return path;
    };
    // Device namespace paths already bypass normalization.
    if s.starts_with(LONG_PREFIX) || s.starts_with(DEVICE_PREFIX) {
        path
    } else if let Some(share) = s.strip_prefix(r"\\") {
        PathBuf::from(format!("{LONG_UNC_PREFIX}{share}"))
    } else {
        PathBuf::from(format!("{LONG_PREFIX}{s}"))
    }
}

#[cfg(not(windows))]
fn to_long_form(path: PathBuf) -> PathBuf {
    path
}

#[cfg(windows)]
fn to_regular_form(path: &Path) -> PathBuf {
    let Some(s) = path.to_str() else {
        return path.to_path_buf();
    };
    if let Some(share) = s.strip_prefix(LONG_UNC_PREFIX) {
        PathBuf::from(format!(r"\\{share}"))
    } else if let Some(rest) = s.strip_prefix(LONG_PREFIX) {
        PathBuf::from(rest)
    } else {
        path.to_path_buf()
    }
}

#[cfg(not(windows))]
fn to_regular_form(path: &Path) -> PathBuf {
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_paths_are_invalid() {
        assert!(matches!(StdPathResolver.resolve(Path::new("")), Err(EnumError::InvalidPath(_))));
        assert!(matches!(StdPathResolver.resolve(Path::new("  ")), Err(EnumError::InvalidPath(_))));
    }

    #[test]
    fn relative_paths_become_absolute() {
        let resolved = StdPathResolver.resolve(Path::new("some/dir")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some/dir"));
    }

    #[cfg(windows)]
    #[test]
    fn long_prefix_round_trips() {
        let long = to_long_form(PathBuf::from(r"C:\data\x"));
        assert_eq!(long, PathBuf::from(r"\\?\C:\data\x"));
        assert_eq!(to_regular_form(&long), PathBuf::from(r"C:\data\x"));

        let unc = to_long_form(PathBuf::from(r"\\server\share\x"));
        assert_eq!(unc, PathBuf::from(r"\\?\UNC\server\share\x"));
        assert_eq!(to_regular_form(&unc), PathBuf::from(r"\\server\share\x"));
    }

    #[cfg(windows)]
    #[test]
    fn device_paths_are_left_alone() {
        let device = to_long_form(PathBuf::from(r"\\.\C:\x"));
        assert_eq!(device, PathBuf::from(r"\\.\C:\x"));
        assert_eq!(to_regular_form(&device), PathBuf::from(r"\\.\C:\x"));
    }
}
