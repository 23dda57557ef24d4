//! Walks a folder tree and picks out media files worth classifying.

use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "mp4", "mov", "avi"];

/// Prefix of sidecar files written by macOS onto foreign filesystems.
const SIDECAR_PREFIX: &str = "._";

/// Depth-first list of candidate files under `root`, sorted by name within each
/// directory so repeated runs see the same order.
pub fn discover(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        // Follows file symlinks; directory symlinks are not descended into.
        if entry.path().is_file() && is_candidate(entry.path()) {
            found.push(entry.into_path());
        }
    }
    found
}

pub fn is_candidate(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.starts_with(SIDECAR_PREFIX) {
        return false;
    }
    let name = name.to_lowercase();
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|ext| name.ends_with(&format!(".{ext}")))
}
