// ============================================================================
// submux-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the MKVToolNix Command-Line Tools
//
// This module encapsulates every interaction with the external MKVToolNix
// binaries (mkvmerge, mkvinfo, mkvextract). Each tool is reached through a
// small trait with a std::process::Command implementation, so the planning
// and execution logic can be exercised in tests with mock runners instead
// of real subprocesses.

use crate::error::{CoreError, CoreResult};

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Contains the track-report scraper and the mkvinfo invocation trait
pub mod mkvinfo;

/// Contains the mkvmerge invocation trait and implementation
pub mod mkvmerge;

/// Contains the mkvextract invocation trait and implementation
pub mod mkvextract;

pub use mkvextract::{CommandMkvextractRunner, MkvextractRunner};
pub use mkvinfo::{parse_track_report, CommandMkvinfoRunner, MkvinfoRunner};
pub use mkvmerge::{CommandMkvmergeRunner, MkvmergeRunner};

/// Binary name of the multiplexer tool.
pub const MKVMERGE: &str = "mkvmerge";

/// Binary name of the container inspection tool.
pub const MKVINFO: &str = "mkvinfo";

/// Binary name of the track extraction tool.
pub const MKVEXTRACT: &str = "mkvextract";

/// Checks that a required external tool is available and executable.
///
/// Runs the tool with `--version` and discards its output; only the ability
/// to start it matters here.
///
/// # Errors
///
/// * `CoreError::DependencyNotFound` - the tool is not present
/// * `CoreError::CommandStart` - the tool exists but failed to start
pub fn check_dependency(tool: &Path) -> CoreResult<()> {
    let result = Command::new(tool)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", tool.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found", tool.display());
            Err(CoreError::DependencyNotFound(
                tool.display().to_string(),
            ))
        }
        Err(e) => {
            log::error!(
                "Failed to start dependency check command '{}': {}",
                tool.display(),
                e
            );
            Err(CoreError::CommandStart(tool.display().to_string(), e))
        }
    }
}

/// Collects the combined diagnostic text of a finished tool invocation.
///
/// mkvmerge writes its error messages to standard output rather than
/// standard error, so the stderr payload is preferred but stdout is used
/// when stderr is empty.
pub(crate) fn diagnostic_text(output: &std::process::Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Maps a process spawn error for `tool` onto the core error taxonomy.
pub(crate) fn spawn_error(tool: &str, e: io::Error) -> CoreError {
    if e.kind() == io::ErrorKind::NotFound {
        CoreError::DependencyNotFound(tool.to_string())
    } else {
        CoreError::CommandStart(tool.to_string(), e)
    }
}
