// ============================================================================
// submux-core/src/processing/plan.rs
// ============================================================================
//
// REMUX PLANNING: Deciding the Action for One Container
//
// This module combines the parsed track report and the matched subtitle
// sidecars into a RemuxPlan: which sidecars to attach, the full mkvmerge
// argument list, and whether the plan is valid at all. The validity rules
// are evaluated in a fixed order and the first failing rule terminates the
// plan; invalid plans are never executed.

use crate::language::DEFAULT_LANGUAGE;
use crate::media::Track;
use crate::processing::execute::RemuxFailure;
use crate::subtitles::SubtitleCandidate;

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Marker inserted before the extension of the rebuilt container while it
/// coexists with the source file.
pub const OUTPUT_MARKER: &str = ".mux";

/// Track-order directive issued when exactly two subtitles are attached:
/// the second discovered sidecar first, then the first, then the original
/// container's own tracks. mkvmerge does not default to this order, so it
/// is always passed explicitly in the two-subtitle case.
pub const TWO_SUBTITLE_TRACK_ORDER: &str = "1:0,0:0";

/// Annotation in a sidecar tag that disqualifies the whole container.
const FORCED_ANNOTATION: &str = "forced";

/// Why a plan cannot be built for a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// A sidecar tag contains the "forced" annotation.
    ForcedSubtitle,
    /// No sidecar qualifies.
    NoSubtitleFile,
    /// More than two sidecars qualify.
    TooManySubtitles,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::ForcedSubtitle => write!(f, "forced subtitle unsupported"),
            InvalidReason::NoSubtitleFile => write!(f, "no subtitle file"),
            InvalidReason::TooManySubtitles => write!(f, "more than two subtitles"),
        }
    }
}

/// Lifecycle of a plan. Transitions Pending -> Invalid | Executed | Failed
/// exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStatus {
    Pending,
    Invalid(InvalidReason),
    Executed,
    Failed(RemuxFailure),
}

/// One sidecar scheduled for attachment, with its resolved language code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub candidate: SubtitleCandidate,
    /// 2-letter code passed to the multiplexer's language directive.
    pub language: String,
}

/// The decided action for one container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemuxPlan {
    /// The source container.
    pub container_path: PathBuf,

    /// Staging path of the rebuilt container (`<base>.mux.<ext>`).
    pub output_path: PathBuf,

    /// Title directive for the rebuilt container (container base name).
    pub title: String,

    /// Sidecars to attach, in discovery order.
    pub attachments: Vec<Attachment>,

    /// Track-order directive; present only with exactly two attachments.
    pub track_order: Option<String>,

    /// Number of original tracks whose display name is cleared in the
    /// rebuilt container. Stripping every name is deliberate normalization.
    pub strip_track_names: usize,

    /// Current lifecycle state.
    pub status: PlanStatus,
}

/// Derives the staging output path by inserting [`OUTPUT_MARKER`] before
/// the container's extension.
fn output_path_for(parent: &Path, base_name: &str, extension: Option<&str>) -> PathBuf {
    match extension {
        Some(ext) => parent.join(format!("{base_name}{OUTPUT_MARKER}.{ext}")),
        None => parent.join(format!("{base_name}{OUTPUT_MARKER}")),
    }
}

/// Resolves a raw sidecar tag to the language code passed to the
/// multiplexer. Only a tag of exactly two characters is trusted; anything
/// else (including 3-letter codes) falls back to the default.
fn resolve_language(language_tag: &str) -> String {
    if language_tag.chars().count() == 2 {
        language_tag.to_string()
    } else {
        DEFAULT_LANGUAGE.to_string()
    }
}

/// Builds the remux plan for one container.
///
/// The invalidity rules run in order and the first match settles the plan:
/// a "forced" sidecar, then zero qualifying sidecars, then more than two.
/// Otherwise the plan comes out Pending with its attachments in discovery
/// order.
pub fn build_plan(
    container: &Path,
    report_tracks: &[Track],
    candidates: Vec<SubtitleCandidate>,
) -> RemuxPlan {
    let parent = container.parent().unwrap_or_else(|| Path::new("."));
    let base_name = container
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    let extension = container.extension().and_then(|e| e.to_str());

    let mut plan = RemuxPlan {
        container_path: container.to_path_buf(),
        output_path: output_path_for(parent, &base_name, extension),
        title: base_name,
        attachments: Vec::new(),
        track_order: None,
        strip_track_names: 0,
        status: PlanStatus::Pending,
    };

    if candidates
        .iter()
        .any(|c| c.language_tag.contains(FORCED_ANNOTATION))
    {
        plan.status = PlanStatus::Invalid(InvalidReason::ForcedSubtitle);
        return plan;
    }
    if candidates.is_empty() {
        plan.status = PlanStatus::Invalid(InvalidReason::NoSubtitleFile);
        return plan;
    }
    if candidates.len() > 2 {
        plan.status = PlanStatus::Invalid(InvalidReason::TooManySubtitles);
        return plan;
    }

    plan.attachments = candidates
        .into_iter()
        .map(|candidate| Attachment {
            language: resolve_language(&candidate.language_tag),
            candidate,
        })
        .collect();

    if plan.attachments.len() == 2 {
        plan.track_order = Some(TWO_SUBTITLE_TRACK_ORDER.to_string());
    }

    plan.strip_track_names = report_tracks.len();
    plan
}

impl RemuxPlan {
    /// Builds the full multiplexer argument list for this plan.
    ///
    /// Layout follows the tool's grammar: per-attachment language
    /// directives with the sidecar in a `( ... )` group, global flags, the
    /// name-clear directives that apply to the following input (the source
    /// container), the container group, the title, and finally the
    /// track-order directive when present.
    pub fn mkvmerge_args(&self, drop_source_subtitles: bool) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();

        args.push("--output".into());
        args.push(self.output_path.clone().into_os_string());

        for attachment in &self.attachments {
            args.push("--language".into());
            args.push(format!("0:{}", attachment.language).into());
            args.push("(".into());
            args.push(attachment.candidate.path.clone().into_os_string());
            args.push(")".into());
        }

        args.push("--no-attachments".into());
        if drop_source_subtitles {
            args.push("--no-subtitles".into());
        }

        for index in 0..self.strip_track_names {
            args.push("--track-name".into());
            args.push(format!("{index}:").into());
        }

        args.push("(".into());
        args.push(self.container_path.clone().into_os_string());
        args.push(")".into());

        args.push("--title".into());
        args.push(self.title.clone().into());

        if let Some(order) = &self.track_order {
            args.push("--track-order".into());
            args.push(order.clone().into());
        }

        args
    }
}
