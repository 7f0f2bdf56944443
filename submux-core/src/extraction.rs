//! Subtitle track extraction.
//!
//! The inverse convenience of the remux pipeline: pull subtitle tracks of
//! requested languages out of Matroska files into sidecar `.srt` files
//! named `<container base>.<lang>.srt`, the same convention the subtitle
//! matcher looks for.

use crate::discovery::find_mkv_files;
use crate::error::CoreResult;
use crate::external::mkvextract::MkvextractRunner;
use crate::external::mkvinfo::{parse_track_report, MkvinfoRunner};
use crate::media::TrackKind;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extracts subtitle tracks from every `.mkv` file under `root`.
///
/// `languages` holds normalized 2-letter codes; tracks whose language is
/// not in the set are skipped, as are files with no matching track. A
/// per-file extraction failure is logged and the batch continues.
///
/// Returns the sidecar paths scheduled for writing.
pub fn extract_subtitles<I: MkvinfoRunner, X: MkvextractRunner>(
    inspector: &I,
    extractor: &X,
    root: &Path,
    languages: &[String],
) -> CoreResult<Vec<PathBuf>> {
    let files = find_mkv_files(root)?;
    let mut written = Vec::new();

    for file in files {
        match extract_one(inspector, extractor, &file, languages) {
            Ok(mut outputs) => written.append(&mut outputs),
            Err(e) => log::warn!("Extraction failed for {}: {}", file.display(), e),
        }
    }

    Ok(written)
}

fn extract_one<I: MkvinfoRunner, X: MkvextractRunner>(
    inspector: &I,
    extractor: &X,
    file: &Path,
    languages: &[String],
) -> CoreResult<Vec<PathBuf>> {
    let report_text = inspector.inspect(file)?;
    let tracks = parse_track_report(&report_text);

    let base = file.with_extension("");
    let mut track_specs: Vec<OsString> = Vec::new();
    let mut outputs = Vec::new();

    for track in tracks {
        if track.kind != TrackKind::Subtitles {
            continue;
        }
        if !languages.iter().any(|l| *l == track.language) {
            continue;
        }
        let destination = PathBuf::from(format!("{}.{}.srt", base.display(), track.language));
        track_specs.push(format!("{}:{}", track.id, destination.display()).into());
        outputs.push(destination);
    }

    if track_specs.is_empty() {
        log::debug!("No matching subtitle tracks in {}", file.display());
        return Ok(Vec::new());
    }

    extractor.extract(file, &track_specs)?;
    Ok(outputs)
}
