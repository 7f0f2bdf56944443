//! Track descriptors for multiplexed media containers.
//!
//! A [`Track`] is the stable contract between the report scraper in
//! `external::mkvinfo` and the planning/extraction logic: if the inspection
//! tool ever grows a structured output mode, only the scraper changes.

/// Classification of a media stream inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Video,
    Audio,
    Subtitles,
    /// Any type token the report carried that we do not recognize.
    Unknown,
}

impl TrackKind {
    /// Maps the inspection tool's literal type token to a kind.
    pub fn from_report_token(token: &str) -> Self {
        match token {
            "video" => TrackKind::Video,
            "audio" => TrackKind::Audio,
            "subtitles" => TrackKind::Subtitles,
            _ => TrackKind::Unknown,
        }
    }
}

/// One media stream inside a container.
///
/// Built transiently while parsing one inspection report; immutable once
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Zero-based stream index, unique within a container. The report
    /// numbers tracks from 1; the parser converts.
    pub id: u32,

    /// Stream classification.
    pub kind: TrackKind,

    /// Normalized 2-letter language code. Defaults to "en" when the report
    /// says "undetermined" or omits the field.
    pub language: String,
}
