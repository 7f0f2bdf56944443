// submux-core/tests/execution_tests.rs

mod common;

use common::{MockMuxer, REBUILT_CONTENT};

use submux_core::processing::execute::{backup_path, execute, RemuxFailure};
use submux_core::{build_plan, PlanStatus, SubtitleCandidate};

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

const ORIGINAL_CONTENT: &[u8] = b"original container";

/// Lays out a container plus sidecars and returns the candidate list in a
/// fixed discovery order.
fn setup(parent: &Path, sidecar_tags: &[&str]) -> (PathBuf, Vec<SubtitleCandidate>) {
    let container = parent.join("Movie.mkv");
    fs::write(&container, ORIGINAL_CONTENT).unwrap();

    let candidates = sidecar_tags
        .iter()
        .map(|tag| {
            let path = parent.join(format!("Movie.{tag}.srt"));
            fs::write(&path, b"subtitle").unwrap();
            SubtitleCandidate {
                path,
                language_tag: (*tag).to_string(),
            }
        })
        .collect();

    (container, candidates)
}

#[test]
fn successful_execution_swaps_and_cleans_up() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let (container, candidates) = setup(dir.path(), &["fr", "en"]);

    let muxer = MockMuxer::succeeding();
    let mut plan = build_plan(&container, &[], candidates.clone());
    execute(&muxer, &mut plan, true).unwrap();

    assert_eq!(plan.status, PlanStatus::Executed);
    // The container path now holds the rebuilt content.
    assert_eq!(fs::read(&container)?, REBUILT_CONTENT);
    // Consumed sidecars, staging file and backup are all gone.
    for candidate in &candidates {
        assert!(!candidate.path.exists());
    }
    assert!(!plan.output_path.exists());
    assert!(!backup_path(&container).exists());

    dir.close()?;
    Ok(())
}

#[test]
fn tool_failure_leaves_everything_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let (container, candidates) = setup(dir.path(), &["fr"]);

    let muxer = MockMuxer::failing("mkvmerge: error: invalid track");
    let mut plan = build_plan(&container, &[], candidates.clone());
    let failure = execute(&muxer, &mut plan, true).unwrap_err();

    match &failure {
        RemuxFailure::Tool { stderr } => assert!(stderr.contains("invalid track")),
        other => panic!("Unexpected failure: {other:?}"),
    }
    assert!(failure.side_effect_free());
    assert_eq!(failure.stage(), "tool-invocation");
    assert_eq!(plan.status, PlanStatus::Failed(failure.clone()));

    // Original container and sidecars still exist, no staging output left.
    assert_eq!(fs::read(&container)?, ORIGINAL_CONTENT);
    for candidate in &candidates {
        assert!(candidate.path.exists());
    }
    assert!(!plan.output_path.exists());

    dir.close()?;
    Ok(())
}

#[test]
fn denied_swap_leaves_both_files_present() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    // The container was never created, so setting it aside fails while the
    // rebuilt output already exists at its staging path.
    let container = dir.path().join("Movie.mkv");
    let sidecar = dir.path().join("Movie.fr.srt");
    fs::write(&sidecar, b"subtitle")?;
    let candidates = vec![SubtitleCandidate {
        path: sidecar.clone(),
        language_tag: "fr".to_string(),
    }];

    let muxer = MockMuxer::succeeding();
    let mut plan = build_plan(&container, &[], candidates);
    let failure = execute(&muxer, &mut plan, true).unwrap_err();

    match &failure {
        RemuxFailure::CleanupDenied { leftover } => {
            assert_eq!(leftover, &vec![plan.output_path.clone()]);
        }
        other => panic!("Unexpected failure: {other:?}"),
    }
    assert_eq!(failure.stage(), "cleanup");
    // Rebuilt output remains at its staging path; nothing was deleted.
    assert!(plan.output_path.exists());
    assert!(sidecar.exists());

    dir.close()?;
    Ok(())
}

#[test]
fn failed_final_move_is_reported_not_resolved() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let (container, candidates) = setup(dir.path(), &["fr"]);

    // The tool exits successfully but the staging output is missing, so the
    // move onto the container's path fails after the source was already set
    // aside.
    let muxer = MockMuxer::succeeding_without_output();
    let mut plan = build_plan(&container, &[], candidates.clone());
    let failure = execute(&muxer, &mut plan, true).unwrap_err();

    match &failure {
        RemuxFailure::FinalMove { .. } => {}
        other => panic!("Unexpected failure: {other:?}"),
    }
    assert_eq!(failure.stage(), "final-move");
    assert!(failure.to_string().contains("need to clean"));
    assert!(!failure.side_effect_free());
    assert_eq!(plan.status, PlanStatus::Failed(failure.clone()));

    // The original content survives at the backup path; nothing was
    // deleted. Resolving this state is left to the operator.
    assert!(!container.exists());
    assert_eq!(fs::read(backup_path(&container))?, ORIGINAL_CONTENT);
    for candidate in &candidates {
        assert!(candidate.path.exists());
    }

    dir.close()?;
    Ok(())
}

#[test]
fn denied_sidecar_deletion_reports_leftovers() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let (container, _) = setup(dir.path(), &[]);

    // A directory where the sidecar should be: remove_file is denied but
    // the swap itself can complete.
    let stubborn = dir.path().join("Movie.fr.srt");
    fs::create_dir(&stubborn)?;
    let candidates = vec![SubtitleCandidate {
        path: stubborn.clone(),
        language_tag: "fr".to_string(),
    }];

    let muxer = MockMuxer::succeeding();
    let mut plan = build_plan(&container, &[], candidates);
    let failure = execute(&muxer, &mut plan, true).unwrap_err();

    match &failure {
        RemuxFailure::CleanupDenied { leftover } => {
            assert_eq!(leftover, &vec![stubborn.clone()]);
        }
        other => panic!("Unexpected failure: {other:?}"),
    }
    assert!(!failure.side_effect_free());

    // The swap completed: rebuilt content in place, backup removed.
    assert_eq!(fs::read(&container)?, REBUILT_CONTENT);
    assert!(!backup_path(&container).exists());
    assert!(stubborn.exists());

    dir.close()?;
    Ok(())
}
