// ============================================================================
// submux-core/src/processing/execute.rs
// ============================================================================
//
// REMUX EXECUTION: Tool Invocation and the Staged File Swap
//
// This module runs a pending plan to completion. The destructive part is
// staged so that no point in the sequence holds the only copy of the source
// container:
//
//   1. mux into the staging output next to the source
//   2. rename the source container to a .bak backup
//   3. rename the staging output onto the source's original path
//   4. delete the consumed sidecars, then the backup
//
// Every failure is tagged with the stage it occurred in, because the stages
// differ in what is left on disk: stage 1 failures are side-effect-free,
// stage 2 and 4 failures leave both copies present, and a stage 3 failure
// is a manual-reconciliation state that is reported and never silently
// resolved.

use crate::error::CoreError;
use crate::external::mkvmerge::MkvmergeRunner;
use crate::processing::plan::{PlanStatus, RemuxPlan};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A stage-tagged execution failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemuxFailure {
    /// The multiplexer exited non-zero (or could not be started). Nothing
    /// on disk has been mutated; the item is safe to skip and retry.
    Tool { stderr: String },

    /// A rename or deletion was denied. The rebuilt output and the source
    /// content both still exist; the listed paths need operator attention.
    CleanupDenied { leftover: Vec<PathBuf> },

    /// The rebuilt output could not be moved onto the container's path
    /// after the source was already set aside. Fatal inconsistency,
    /// requires manual reconciliation.
    FinalMove { detail: String },
}

impl RemuxFailure {
    /// Name of the stage the failure occurred in.
    pub fn stage(&self) -> &'static str {
        match self {
            RemuxFailure::Tool { .. } => "tool-invocation",
            RemuxFailure::CleanupDenied { .. } => "cleanup",
            RemuxFailure::FinalMove { .. } => "final-move",
        }
    }

    /// True when the failure left the filesystem exactly as it was.
    pub fn side_effect_free(&self) -> bool {
        matches!(self, RemuxFailure::Tool { .. })
    }
}

impl fmt::Display for RemuxFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemuxFailure::Tool { stderr } => write!(f, "{stderr}"),
            RemuxFailure::CleanupDenied { leftover } => {
                write!(f, "cleanup denied, files left behind:")?;
                for path in leftover {
                    write!(f, " {}", path.display())?;
                }
                Ok(())
            }
            RemuxFailure::FinalMove { detail } => write!(f, "need to clean: {detail}"),
        }
    }
}

/// Path the source container is set aside under during the swap.
pub fn backup_path(container: &Path) -> PathBuf {
    let mut os = container.as_os_str().to_os_string();
    os.push(".bak");
    PathBuf::from(os)
}

/// Executes a pending plan.
///
/// Preconditions: `plan.status == Pending`. Invalid plans must never reach
/// this function. On return the plan is `Executed` or `Failed`; it is never
/// left `Pending`.
pub fn execute<M: MkvmergeRunner>(
    runner: &M,
    plan: &mut RemuxPlan,
    drop_source_subtitles: bool,
) -> Result<(), RemuxFailure> {
    debug_assert!(
        matches!(plan.status, PlanStatus::Pending),
        "execute() requires a pending plan"
    );

    let result = run_stages(runner, plan, drop_source_subtitles);
    plan.status = match &result {
        Ok(()) => PlanStatus::Executed,
        Err(failure) => PlanStatus::Failed(failure.clone()),
    };
    result
}

fn run_stages<M: MkvmergeRunner>(
    runner: &M,
    plan: &RemuxPlan,
    drop_source_subtitles: bool,
) -> Result<(), RemuxFailure> {
    // Stage 1: invoke the multiplexer. The source container and sidecars
    // are untouched on failure; only a partial staging file may exist.
    if let Err(e) = runner.run(&plan.mkvmerge_args(drop_source_subtitles)) {
        let _ = fs::remove_file(&plan.output_path);
        let stderr = match e {
            CoreError::ToolFailed { stderr, .. } => stderr,
            other => other.to_string(),
        };
        return Err(RemuxFailure::Tool { stderr });
    }

    // Stage 2: set the source aside before anything is deleted, so the
    // original content survives every later failure.
    let backup = backup_path(&plan.container_path);
    if let Err(e) = fs::rename(&plan.container_path, &backup) {
        log::warn!(
            "Could not set aside {}: {}",
            plan.container_path.display(),
            e
        );
        return Err(RemuxFailure::CleanupDenied {
            leftover: vec![plan.output_path.clone()],
        });
    }

    // Stage 3: move the rebuilt output onto the container's path. Atomic
    // where the filesystem renames atomically; both paths share a parent
    // directory, so no cross-device move is involved.
    if let Err(e) = fs::rename(&plan.output_path, &plan.container_path) {
        log::error!(
            "Rebuilt output {} could not replace {}: {}",
            plan.output_path.display(),
            plan.container_path.display(),
            e
        );
        return Err(RemuxFailure::FinalMove {
            detail: e.to_string(),
        });
    }

    // Stage 4: the swap is complete; remove the consumed sidecars and the
    // backup. Denied deletions are collected rather than retried, since a
    // retry against a locked file risks hitting the wrong target.
    let mut leftover = Vec::new();
    for attachment in &plan.attachments {
        let sidecar = &attachment.candidate.path;
        if let Err(e) = fs::remove_file(sidecar) {
            if sidecar.exists() {
                log::warn!("Could not delete sidecar {}: {}", sidecar.display(), e);
                leftover.push(sidecar.clone());
            }
        }
    }
    if let Err(e) = fs::remove_file(&backup) {
        if backup.exists() {
            log::warn!("Could not delete backup {}: {}", backup.display(), e);
            leftover.push(backup);
        }
    }

    if leftover.is_empty() {
        Ok(())
    } else {
        Err(RemuxFailure::CleanupDenied { leftover })
    }
}
