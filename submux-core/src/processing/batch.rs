// ============================================================================
// submux-core/src/processing/batch.rs
// ============================================================================
//
// BATCH ORCHESTRATION: Running the Pipeline over Many Containers
//
// This module iterates a discovered container list, runs the full pipeline
// per item (match sidecars, inspect tracks, plan, execute), and aggregates
// every non-success outcome for the final report. One container's failure
// never aborts the batch. Processing stops early once the configured cap of
// successful completions is reached.

use crate::config::CoreConfig;
use crate::external::mkvinfo::{parse_track_report, MkvinfoRunner};
use crate::external::mkvmerge::MkvmergeRunner;
use crate::processing::execute::execute;
use crate::processing::plan::{build_plan, PlanStatus};
use crate::subtitles::find_candidates;

use std::path::{Path, PathBuf};

/// One container that did not reach `Executed`, with its human-readable
/// reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedContainer {
    pub path: PathBuf,
    pub reason: String,
}

/// Aggregate outcome of a batch run. Successful containers are only
/// counted; failures are itemized.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failures: Vec<FailedContainer>,
}

/// Processes a list of containers sequentially.
///
/// Containers run in the order given. When `config.max_successes` is
/// non-negative, processing stops after that many successful completions;
/// failures never count against the cap.
pub fn process_containers<I: MkvinfoRunner, M: MkvmergeRunner>(
    inspector: &I,
    muxer: &M,
    config: &CoreConfig,
    containers: &[PathBuf],
) -> BatchReport {
    let mut report = BatchReport::default();

    for container in containers {
        if !config.unlimited() && report.succeeded >= config.max_successes as usize {
            log::info!(
                "Reached cap of {} successful remuxes, stopping",
                config.max_successes
            );
            break;
        }

        match process_one(inspector, muxer, config, container) {
            Ok(()) => report.succeeded += 1,
            Err(reason) => {
                log::warn!("Skipping {}: {}", container.display(), reason);
                report.failures.push(FailedContainer {
                    path: container.clone(),
                    reason,
                });
            }
        }
    }

    report
}

/// Runs the full pipeline for one container. Any failure is returned as the
/// reason string recorded in the batch report.
fn process_one<I: MkvinfoRunner, M: MkvmergeRunner>(
    inspector: &I,
    muxer: &M,
    config: &CoreConfig,
    container: &Path,
) -> Result<(), String> {
    let parent = match container.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let base_name = container
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| "container file name is not valid UTF-8".to_string())?;

    let candidates = find_candidates(parent, base_name).map_err(|e| e.to_string())?;

    let report_text = inspector.inspect(container).map_err(|e| e.to_string())?;
    let tracks = parse_track_report(&report_text);

    let mut plan = build_plan(container, &tracks, candidates);
    if let PlanStatus::Invalid(reason) = &plan.status {
        return Err(reason.to_string());
    }

    log::info!("Muxing {}", container.display());
    execute(muxer, &mut plan, config.drop_source_subtitles).map_err(|f| f.to_string())
}
