//! Container inspection via mkvinfo, and the scraper for its text report.
//!
//! mkvinfo has no machine-readable output mode; it prints an
//! indentation-delimited tree where `|+` marks a top-level section and
//! deeper nodes add spaces before the `+`. The scraper below treats that
//! text as best-effort: a malformed or absent `Tracks` section yields an
//! empty track list, never an error. Everything downstream depends only on
//! the [`Track`] contract, so a future structured mode would replace this
//! file alone.

use crate::error::{CoreError, CoreResult};
use crate::language;
use crate::media::{Track, TrackKind};

use std::path::{Path, PathBuf};
use std::process::Command;

/// Top-level section header that starts the track listing.
const TRACKS_HEADER: &str = "|+ Tracks";

/// Line that begins a new track record within the section.
const TRACK_MARKER: &str = "| + Track";

/// Prefix of the field lines directly beneath a track marker.
const FIELD_PREFIX: &str = "|  + ";

/// Trait for running the container inspection tool.
pub trait MkvinfoRunner {
    /// Returns the textual diagnostic dump for `container`.
    fn inspect(&self, container: &Path) -> CoreResult<String>;
}

/// Production implementation invoking the mkvinfo binary.
pub struct CommandMkvinfoRunner {
    tool: PathBuf,
}

impl CommandMkvinfoRunner {
    pub fn new(tool: PathBuf) -> Self {
        Self { tool }
    }
}

impl MkvinfoRunner for CommandMkvinfoRunner {
    fn inspect(&self, container: &Path) -> CoreResult<String> {
        log::debug!("Inspecting {}", container.display());
        let output = Command::new(&self.tool)
            .arg(container)
            .output()
            .map_err(|e| super::spawn_error(super::MKVINFO, e))?;

        if !output.status.success() {
            return Err(CoreError::ToolFailed {
                tool: super::MKVINFO.to_string(),
                stderr: super::diagnostic_text(&output),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Scraper state: outside any track listing, or inside the `Tracks`
/// section. Modeled explicitly so the flush-on-section-end transitions are
/// visible in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScraperState {
    Idle,
    InTracks,
}

/// Fields accumulated for one track record between two markers.
#[derive(Debug, Default)]
struct TrackAccumulator {
    id: Option<u32>,
    kind: Option<TrackKind>,
    language: Option<String>,
}

impl TrackAccumulator {
    /// Applies one field line (with the indentation prefix already
    /// stripped) to the record under construction.
    fn apply(&mut self, field: &str) {
        if let Some(value) = field.strip_prefix("Track number:") {
            // The report numbers tracks from 1; track ids are 0-based.
            if let Some(n) = first_token(value).and_then(|t| t.parse::<u32>().ok()) {
                self.id = Some(n.saturating_sub(1));
            }
        } else if let Some(value) = field.strip_prefix("Track type:") {
            if let Some(token) = first_token(value) {
                self.kind = Some(TrackKind::from_report_token(token));
            }
        } else if let Some(value) = field.strip_prefix("Language:") {
            if let Some(token) = first_token(value) {
                self.language = Some(language::normalize_or_default(token));
            }
        }
    }

    /// Finishes the record. `fallback_id` is the positional index used when
    /// the report never stated a track number.
    fn into_track(self, fallback_id: u32) -> Track {
        Track {
            id: self.id.unwrap_or(fallback_id),
            kind: self.kind.unwrap_or(TrackKind::Unknown),
            language: self
                .language
                .unwrap_or_else(|| language::DEFAULT_LANGUAGE.to_string()),
        }
    }
}

fn first_token(value: &str) -> Option<&str> {
    value.split_whitespace().next()
}

fn flush(current: &mut Option<TrackAccumulator>, tracks: &mut Vec<Track>) {
    if let Some(acc) = current.take() {
        let fallback_id = tracks.len() as u32;
        tracks.push(acc.into_track(fallback_id));
    }
}

/// Parses the inspection tool's text report into an ordered track list.
///
/// Tracks appear in report order. The record still being accumulated when
/// the section or the input ends is flushed as well; forgetting it would
/// undercount by one.
pub fn parse_track_report(report: &str) -> Vec<Track> {
    let mut tracks = Vec::new();
    let mut state = ScraperState::Idle;
    let mut current: Option<TrackAccumulator> = None;

    for line in report.lines() {
        let line = line.trim_end_matches('\r');
        match state {
            ScraperState::Idle => {
                if line == TRACKS_HEADER {
                    state = ScraperState::InTracks;
                }
            }
            ScraperState::InTracks => {
                if line == TRACKS_HEADER {
                    // A repeated header keeps us in the section.
                } else if line.starts_with("|+") {
                    // Any other top-level section ends the track listing.
                    flush(&mut current, &mut tracks);
                    state = ScraperState::Idle;
                } else if line == TRACK_MARKER {
                    flush(&mut current, &mut tracks);
                    current = Some(TrackAccumulator::default());
                } else if let Some(field) = line.strip_prefix(FIELD_PREFIX) {
                    if let Some(acc) = current.as_mut() {
                        acc.apply(field);
                    }
                }
            }
        }
    }

    // Input may end while still inside the section.
    flush(&mut current, &mut tracks);
    tracks
}
