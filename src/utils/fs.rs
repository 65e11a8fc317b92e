// File system utilities

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Configuration for directory traversal
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Maximum depth to traverse
    pub max_depth: Option<usize>,
    /// Directory names that are never descended into
    pub ignore_dirs: Vec<String>,
    /// File names that are skipped
    pub ignore_files: Vec<String>,
    /// File extensions to include, with their leading dot (if empty, include all)
    pub include_extensions: Vec<String>,
    /// Whether to follow symbolic links
    pub follow_links: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            ignore_dirs: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                "dist".to_string(),
                "build".to_string(),
            ],
            ignore_files: vec![],
            include_extensions: vec![],
            follow_links: false,
        }
    }
}

/// File information structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub extension: Option<String>,
}

/// Walk a directory and yield the files that pass the filters
///
/// Ignored directories are pruned before descending. Walk errors are yielded
/// to the caller rather than dropped.
pub fn walk_files<'a>(
    root: &'a Path,
    config: &'a WalkConfig,
) -> impl Iterator<Item = Result<FileInfo, walkdir::Error>> + 'a {
    debug!("Walking directory: {} with config: {:?}", root.display(), config);

    let mut walker = WalkDir::new(root).follow_links(config.follow_links);
    if let Some(max_depth) = config.max_depth {
        walker = walker.max_depth(max_depth);
    }

    let ignore_dirs: HashSet<&str> = config.ignore_dirs.iter().map(String::as_str).collect();
    let ignore_files: HashSet<&str> = config.ignore_files.iter().map(String::as_str).collect();

    walker
        .into_iter()
        .filter_entry(move |entry| !is_ignored_dir(entry, &ignore_dirs))
        .filter_map(move |entry| match entry {
            Ok(entry) => {
                if !entry.file_type().is_file() || ignore_files.contains(file_name(&entry)) {
                    return None;
                }
                if !config.include_extensions.is_empty()
                    && !has_extension(entry.path(), &config.include_extensions)
                {
                    return None;
                }

                let relative_path = entry
                    .path()
                    .strip_prefix(root)
                    .unwrap_or(entry.path())
                    .to_path_buf();

                Some(Ok(FileInfo {
                    path: entry.path().to_path_buf(),
                    relative_path,
                    extension: get_file_extension(entry.path()),
                }))
            }
            Err(e) => Some(Err(e)),
        })
}

fn file_name(entry: &DirEntry) -> &str {
    entry.file_name().to_str().unwrap_or("")
}

/// The root itself is never pruned, whatever its name
fn is_ignored_dir(entry: &DirEntry, ignore_dirs: &HashSet<&str>) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && ignore_dirs.contains(file_name(entry))
}

/// Get file extension in lowercase, with its leading dot
pub fn get_file_extension<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| format!(".{}", s.to_lowercase()))
}

/// Whether `path` ends in one of `extensions` (compared case-insensitively)
pub fn has_extension<P: AsRef<Path>>(path: P, extensions: &[String]) -> bool {
    match get_file_extension(path) {
        Some(ext) => extensions.iter().any(|wanted| wanted.to_lowercase() == ext),
        None => false,
    }
}
