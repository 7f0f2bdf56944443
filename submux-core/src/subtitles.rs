//! Subtitle sidecar matching.
//!
//! A sidecar belongs to a container when its file name contains the
//! container's base name and carries a subtitle extension. The raw language
//! tag is whatever sits between the base name (plus one separator
//! character) and the final extension; it is deliberately unvalidated here,
//! since the planner decides what to make of it.

use crate::error::CoreResult;

use std::path::{Path, PathBuf};

/// Extensions identifying a sidecar subtitle file.
const SUBTITLE_EXTENSIONS: &[&str] = &["srt"];

/// A sidecar subtitle file believed to belong to a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleCandidate {
    /// Filesystem location of the sidecar.
    pub path: PathBuf,

    /// Raw tag between the container base name and the extension. May be a
    /// 2-letter code, a word containing "forced", or empty/garbage. Only a
    /// tag of exactly two characters is ever trusted as a language code.
    pub language_tag: String,
}

pub(crate) fn is_subtitle_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext_str| {
            SUBTITLE_EXTENSIONS
                .iter()
                .any(|s| ext_str.eq_ignore_ascii_case(s))
        })
        .unwrap_or(false)
}

/// Derives the raw language tag from a sidecar file name.
///
/// The tag is the substring strictly between `<base_name>` plus its first
/// following separator character and the final extension, e.g.
/// `Movie.fr.srt` with base `Movie` yields `fr`, and `Movie.srt` yields an
/// empty tag.
fn language_tag(file_name: &str, base_name: &str) -> String {
    let end = file_name.rfind('.').unwrap_or(file_name.len());
    let start = base_name.len().min(end);
    // The base-name boundary may fall inside a multi-byte character.
    let raw = file_name.get(start..end).unwrap_or("");

    // Drop the single separator character that follows the base name.
    let mut chars = raw.chars();
    chars.next();
    chars.as_str().to_string()
}

/// Finds subtitle sidecar candidates for a container in `parent_dir`.
///
/// `base_name` is the container file name without its extension. Results
/// follow directory listing order, which is platform-dependent; callers
/// must not assume it is sorted.
pub fn find_candidates(parent_dir: &Path, base_name: &str) -> CoreResult<Vec<SubtitleCandidate>> {
    let mut candidates = Vec::new();

    for entry in std::fs::read_dir(parent_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !is_subtitle_file(&path) {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !file_name.contains(base_name) {
            continue;
        }

        let tag = language_tag(file_name, base_name);
        candidates.push(SubtitleCandidate {
            path,
            language_tag: tag,
        });
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_between_base_name_and_extension() {
        assert_eq!(language_tag("Movie.fr.srt", "Movie"), "fr");
        assert_eq!(language_tag("Movie.forced.srt", "Movie"), "forced");
        assert_eq!(language_tag("Movie.eng.srt", "Movie"), "eng");
    }

    #[test]
    fn tag_empty_when_nothing_between() {
        assert_eq!(language_tag("Movie.srt", "Movie"), "");
    }
}
