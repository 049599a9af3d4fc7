//! Wholesale dataset file I/O: one JSON array of posts, read and written
//! in a single pass.

use crate::error::ArchivistError;
use crate::types::Dataset;
use std::fs;
use std::path::Path;
use tracing::info;

/// Reads a whole dataset into memory.
///
/// A missing file is a usage error, not a crash: the error carries the
/// other `.json` files found next to the requested path so the caller can
/// print them as suggestions.
pub fn load_dataset(path: &Path) -> Result<Dataset, ArchivistError> {
    if !path.exists() {
        return Err(ArchivistError::DatasetNotFound {
            path: path.display().to_string(),
            candidates: json_candidates(path),
        });
    }

    let raw = fs::read_to_string(path)?;
    let posts: Dataset = serde_json::from_str(&raw)?;
    info!("Loaded {} posts from {}", posts.len(), path.display());
    Ok(posts)
}

/// Writes the whole dataset, pretty-printed, replacing any previous file.
pub fn save_dataset(path: &Path, posts: &Dataset) -> Result<(), ArchivistError> {
    let serialized = serde_json::to_string_pretty(posts)?;
    fs::write(path, serialized)?;
    info!("Saved {} posts to {}", posts.len(), path.display());
    Ok(())
}

fn json_candidates(path: &Path) -> Vec<String> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    let mut candidates = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let p = entry.path();
            if p.extension().is_some_and(|ext| ext == "json") {
                if let Some(name) = p.file_name().and_then(|n| n.to_str()) {
                    candidates.push(name.to_string());
                }
            }
        }
    }
    candidates.sort();
    candidates
}
