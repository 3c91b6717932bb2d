use ignore::{DirEntry, WalkBuilder};
use log::warn;
use std::cmp::Ordering;
use std::path::Path;

/// Prefix of macOS resource-fork artifacts, which are never reported.
pub const RESOURCE_FORK_PREFIX: &str = "._";

/// Every file under `path`, recursively, top-down.
///
/// Within each directory the files come first, in name order, before any
/// subdirectory is entered. Hidden files and ignore files are not filtered.
/// Dangling symlinks are yielded so they can still match by name.
pub fn walk_files(path: &Path) -> impl Iterator<Item = DirEntry> {
    WalkBuilder::new(path)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_path(files_before_directories)
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {e}");
                None
            }
        })
        .filter(is_file_like)
        .filter(|entry| !is_resource_fork(entry))
}

fn files_before_directories(a: &Path, b: &Path) -> Ordering {
    a.is_dir()
        .cmp(&b.is_dir())
        .then_with(|| a.file_name().cmp(&b.file_name()))
}

fn is_file_like(entry: &DirEntry) -> bool {
    let path = entry.path();
    path.is_file() || (entry.path_is_symlink() && !path.exists())
}

fn is_resource_fork(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .as_encoded_bytes()
        .starts_with(RESOURCE_FORK_PREFIX.as_bytes())
}
