//! Level folder and asset discovery

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

use super::ordering::LEVEL_ROOT_ASSET;

/// A directory entry that could not be read while listing a folder
#[derive(Debug)]
pub struct UnreadableEntry {
    /// Path of the entry
    pub path: PathBuf,
    /// Why it could not be read
    pub error: Error,
}

/// Candidate assets of a level folder, as found on disk
#[derive(Debug, Default)]
pub struct LevelScan {
    /// Candidate asset file names in directory-listing order
    pub assets: Vec<String>,
    /// Candidate asset entries that could not be read (broken links,
    /// permission errors)
    pub unreadable: Vec<UnreadableEntry>,
}

/// Split a walk error into a skippable entry, or the error itself when the
/// listed directory is the one that failed.
fn unreadable_entry(err: walkdir::Error) -> Result<UnreadableEntry> {
    if err.depth() == 0 {
        return Err(err.into());
    }
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other(message));
    Ok(UnreadableEntry {
        error: Error::AssetRead {
            path: path.clone(),
            source,
        },
        path,
    })
}

/// Find the level folders to process
///
/// Level folders are the immediate subdirectories of `levels_dir`, minus any
/// whose name `is_excluded` accepts. Entries that cannot be read (a dangling
/// symlink, a permission error) are logged and skipped.
///
/// # Returns
/// Level folder paths sorted by name.
///
/// # Errors
/// Returns [`Error::MissingDirectory`] if `levels_dir` is not a directory.
pub fn find_level_folders<P, F>(levels_dir: P, is_excluded: F) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
    F: Fn(&str) -> bool,
{
    let levels_dir = levels_dir.as_ref();
    if !levels_dir.is_dir() {
        return Err(Error::MissingDirectory {
            path: levels_dir.to_path_buf(),
        });
    }

    let mut folders = Vec::new();
    for entry in WalkDir::new(levels_dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let skipped = unreadable_entry(err)?;
                tracing::warn!("Skipping unreadable entry: {}", skipped.error);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if is_excluded(&name) {
            tracing::debug!("Skipping excluded level: {name}");
            continue;
        }
        folders.push(entry.into_path());
    }

    folders.sort();
    Ok(folders)
}

/// Returns true if a file name is a candidate asset for script generation.
///
/// The name must end with `.{extension}` and either contain `Topic`, contain
/// `Proof`, or be exactly `level.asset`. All checks are case-sensitive.
pub fn is_candidate_asset(file_name: &str, extension: &str) -> bool {
    let has_extension = file_name
        .strip_suffix(extension)
        .is_some_and(|stem| stem.ends_with('.'));
    has_extension
        && (file_name.contains("Topic")
            || file_name.contains("Proof")
            || file_name == LEVEL_ROOT_ASSET)
}

/// Scan a level folder for candidate assets
///
/// Only regular files directly inside `folder` are considered. Entries that
/// cannot be read are reported in [`LevelScan::unreadable`] when their name
/// is a candidate, and logged and ignored otherwise.
///
/// # Errors
/// Returns an error if `folder` itself cannot be listed.
pub fn scan_level_folder<P: AsRef<Path>>(folder: P, extension: &str) -> Result<LevelScan> {
    let mut scan = LevelScan::default();
    for entry in WalkDir::new(folder.as_ref())
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let skipped = unreadable_entry(err)?;
                let is_candidate = skipped
                    .path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| is_candidate_asset(n, extension));
                if is_candidate {
                    scan.unreadable.push(skipped);
                } else {
                    tracing::debug!("Ignoring unreadable entry: {}", skipped.error);
                }
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!("Skipping non UTF-8 file name: {}", entry.path().display());
            continue;
        };
        if is_candidate_asset(name, extension) {
            scan.assets.push(name.to_string());
        }
    }
    Ok(scan)
}

/// List candidate asset file names directly inside a level folder
///
/// Unreadable entries are logged and left out.
///
/// # Returns
/// File names (not paths) in directory-listing order. Use
/// [`order_asset_files`](super::ordering::order_asset_files) for processing
/// order.
pub fn find_candidate_assets<P: AsRef<Path>>(folder: P, extension: &str) -> Result<Vec<String>> {
    let scan = scan_level_folder(folder, extension)?;
    for skipped in &scan.unreadable {
        tracing::warn!("Skipping unreadable asset: {}", skipped.error);
    }
    Ok(scan.assets)
}
