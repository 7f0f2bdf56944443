//! Rename by online metadata lookup.
//!
//! Standalone collaborator of the remux pipeline: for files named
//! `Title - Info.ext`, look the title up on TMDB, derive the release year,
//! and splice ` (YYYY)` after the title. The trailing info segment is kept
//! or reduced to the bare extension per a caller flag. Lookup is behind the
//! [`MetadataProvider`] trait so the naming logic tests without a network.

use crate::discovery::is_video_file;
use crate::error::CoreResult;
use crate::subtitles::is_subtitle_file;

use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Separator between the title and the info segment of a file name.
const INFO_SEPARATOR: &str = " - ";

/// Source of release years for movie titles.
pub trait MetadataProvider {
    /// Returns the release year of the best match for `title`, or `None`
    /// when the search finds nothing (or the match has no release date).
    fn release_year(&self, title: &str) -> CoreResult<Option<String>>;
}

/// TMDB-backed implementation of [`MetadataProvider`].
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::blocking::Client,
}

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    id: u64,
}

#[derive(Deserialize)]
struct MovieDetails {
    #[serde(default)]
    release_date: String,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: TMDB_BASE_URL.to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl MetadataProvider for TmdbClient {
    fn release_year(&self, title: &str) -> CoreResult<Option<String>> {
        let search: SearchResponse = self
            .client
            .get(format!("{}/search/movie", self.base_url))
            .query(&[("api_key", self.api_key.as_str()), ("query", title)])
            .send()?
            .error_for_status()?
            .json()?;

        let Some(first) = search.results.first() else {
            return Ok(None);
        };

        let details: MovieDetails = self
            .client
            .get(format!("{}/movie/{}", self.base_url, first.id))
            .query(&[("api_key", self.api_key.as_str())])
            .send()?
            .error_for_status()?
            .json()?;

        Ok(details
            .release_date
            .split('-')
            .next()
            .filter(|year| !year.is_empty())
            .map(str::to_string))
    }
}

/// The decided renames for one directory, plus the files no new name could
/// be derived for.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    /// (old name, new name) pairs, ready to apply.
    pub renames: Vec<(String, String)>,
    /// Files skipped: malformed name, no search result, or lookup failure.
    pub not_found: Vec<String>,
}

/// Splices the release year into a `Title - Info.ext` file name. Returns
/// `None` when the name has no separator, or no extension dot while the
/// info segment is being dropped.
fn splice_year(file_name: &str, year: &str, keep_info: bool) -> Option<String> {
    let sep = file_name.find(INFO_SEPARATOR)?;
    let (title, info) = file_name.split_at(sep);

    let mut new_name = format!("{title} ({year})");
    if keep_info {
        new_name.push_str(info);
    } else {
        let dot = info.find('.')?;
        new_name.push_str(&info[dot..]);
    }
    Some(new_name)
}

/// Lists the file names in `dir` eligible for renaming: video containers
/// and subtitle sidecars.
pub fn list_renameable_files(dir: &Path) -> CoreResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !(is_video_file(&path) || is_subtitle_file(&path)) {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Derives new names for `files` via the metadata provider.
///
/// Lookup failures are non-fatal: the file lands in `not_found` and the
/// pass continues. A non-negative `max_count` caps how many files are
/// looked up at all; negative means unlimited.
pub fn plan_new_names<P: MetadataProvider>(
    provider: &P,
    files: &[String],
    keep_info: bool,
    max_count: i32,
) -> RenamePlan {
    let mut plan = RenamePlan::default();
    let mut processed: i32 = 0;

    for file_name in files {
        if max_count >= 0 && processed >= max_count {
            break;
        }
        processed += 1;

        let Some(sep) = file_name.find(INFO_SEPARATOR) else {
            plan.not_found.push(file_name.clone());
            continue;
        };
        let title = &file_name[..sep];

        match provider.release_year(title) {
            Ok(Some(year)) => match splice_year(file_name, &year, keep_info) {
                Some(new_name) => plan.renames.push((file_name.clone(), new_name)),
                None => plan.not_found.push(file_name.clone()),
            },
            Ok(None) => plan.not_found.push(file_name.clone()),
            Err(e) => {
                log::warn!("Metadata lookup failed for '{title}': {e}");
                plan.not_found.push(file_name.clone());
            }
        }
    }

    plan
}

/// Applies a rename plan inside `dir`.
pub fn apply_renames(dir: &Path, renames: &[(String, String)]) -> CoreResult<()> {
    for (old_name, new_name) in renames {
        log::info!("Renaming '{old_name}' -> '{new_name}'");
        fs::rename(dir.join(old_name), dir.join(new_name))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreResult;

    struct FixedProvider {
        year: Option<String>,
    }

    impl MetadataProvider for FixedProvider {
        fn release_year(&self, _title: &str) -> CoreResult<Option<String>> {
            Ok(self.year.clone())
        }
    }

    #[test]
    fn splices_year_and_keeps_info() {
        assert_eq!(
            splice_year("Heat - VF VOSTFR.mkv", "1995", true),
            Some("Heat (1995) - VF VOSTFR.mkv".to_string())
        );
    }

    #[test]
    fn splices_year_and_drops_info() {
        assert_eq!(
            splice_year("Heat - VF VOSTFR.mkv", "1995", false),
            Some("Heat (1995).mkv".to_string())
        );
    }

    #[test]
    fn name_without_separator_is_rejected() {
        assert_eq!(splice_year("Heat.mkv", "1995", true), None);
    }

    #[test]
    fn plan_collects_renames_and_not_found() {
        let provider = FixedProvider {
            year: Some("1995".to_string()),
        };
        let files = vec![
            "Heat - VF.mkv".to_string(),
            "NoSeparator.mkv".to_string(),
        ];
        let plan = plan_new_names(&provider, &files, true, -1);
        assert_eq!(
            plan.renames,
            vec![("Heat - VF.mkv".to_string(), "Heat (1995) - VF.mkv".to_string())]
        );
        assert_eq!(plan.not_found, vec!["NoSeparator.mkv".to_string()]);
    }

    #[test]
    fn plan_honors_lookup_cap() {
        let provider = FixedProvider {
            year: Some("2000".to_string()),
        };
        let files = vec![
            "A - x.mkv".to_string(),
            "B - x.mkv".to_string(),
            "C - x.mkv".to_string(),
        ];
        let plan = plan_new_names(&provider, &files, true, 2);
        assert_eq!(plan.renames.len(), 2);
    }

    #[test]
    fn missing_result_lands_in_not_found() {
        let provider = FixedProvider { year: None };
        let files = vec!["Heat - VF.mkv".to_string()];
        let plan = plan_new_names(&provider, &files, true, -1);
        assert!(plan.renames.is_empty());
        assert_eq!(plan.not_found, files);
    }
}
