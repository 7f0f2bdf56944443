//! File discovery module for finding container files to process.
//!
//! Scans the input directory recursively for video container files,
//! identified by extension (case-insensitive).

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extensions treated as video containers during discovery.
const VIDEO_EXTENSIONS: &[&str] = &["mkv", "mp4", "m4v", "avi", "mov", "webm"];

/// Checks if the given path is a video container file eligible for
/// processing.
#[must_use]
pub fn is_video_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext_str| {
                VIDEO_EXTENSIONS
                    .iter()
                    .any(|v| ext_str.eq_ignore_ascii_case(v))
            })
            .unwrap_or(false)
}

/// Finds video container files eligible for processing under `input_dir`,
/// searching subdirectories as well.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths of the discovered container files
/// * `Err(CoreError::Walkdir)` - If an error occurs during traversal
/// * `Err(CoreError::NoFilesFound)` - If no container files are found
pub fn find_processable_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(input_dir) {
        let entry = entry?;
        if is_video_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        Err(CoreError::NoFilesFound)
    } else {
        Ok(files)
    }
}

/// Finds Matroska files only. Subtitle extraction operates on `.mkv` files
/// exclusively since the extraction tool is Matroska-specific.
pub fn find_mkv_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(input_dir) {
        let entry = entry?;
        let path = entry.path();
        let is_mkv = path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext_str| ext_str.eq_ignore_ascii_case("mkv"))
                .unwrap_or(false);
        if is_mkv {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        Err(CoreError::NoFilesFound)
    } else {
        Ok(files)
    }
}
