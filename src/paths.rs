//! Path handling for caller supplied locations.

use std::path::{Path, PathBuf};

/// Expand a leading `~` to the user's home directory.
///
/// Applied to every caller supplied path before it touches the filesystem.
/// `~user` forms are returned unchanged, as is everything else when no home
/// directory can be determined.
pub fn expand_user(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// Directory a sibling temp file must be created in so that renaming it over
/// `path` stays on one filesystem.
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
