// ============================================================================
// submux-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structure
//
// This module defines the configuration passed into the batch orchestrator
// and the CLI. Tool locations and batch caps are explicit fields here rather
// than process-wide constants, so library consumers control them per run.

use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};

/// Sentinel for [`CoreConfig::max_successes`] meaning "no cap".
///
/// Any negative value disables the cap; this constant is the conventional
/// spelling.
pub const UNLIMITED: i32 = -1;

/// Main configuration structure for the submux-core library.
///
/// Created by the consumer of the library (e.g. submux-cli) and passed to
/// the batch entry points.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    // ---- Path Configuration ----
    /// Directory searched (recursively) for container files to process.
    pub input_dir: PathBuf,

    /// Directory holding the MKVToolNix binaries (mkvmerge, mkvinfo,
    /// mkvextract). `None` means resolve them on `PATH`.
    pub mkvtoolnix_dir: Option<PathBuf>,

    // ---- Batch Options ----
    /// Stop after this many successful remuxes. Negative means unlimited;
    /// failures never count against the cap.
    pub max_successes: i32,

    /// Pass the multiplexer flag that drops subtitle tracks already present
    /// in the source container, so the attached sidecars become the only
    /// subtitle tracks in the output.
    pub drop_source_subtitles: bool,
}

impl CoreConfig {
    /// Creates a configuration with default batch options for the given
    /// input directory.
    pub fn new(input_dir: PathBuf) -> Self {
        Self {
            input_dir,
            mkvtoolnix_dir: None,
            max_successes: UNLIMITED,
            drop_source_subtitles: true,
        }
    }

    /// Validates the configuration before a batch run.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.input_dir.is_dir() {
            return Err(CoreError::Config(format!(
                "input directory '{}' does not exist or is not a directory",
                self.input_dir.display()
            )));
        }
        if let Some(dir) = &self.mkvtoolnix_dir {
            if !dir.is_dir() {
                return Err(CoreError::Config(format!(
                    "mkvtoolnix directory '{}' does not exist",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Resolves the path used to invoke an external tool: either inside the
    /// configured MKVToolNix directory, or the bare name for `PATH` lookup.
    pub fn tool_path(&self, tool_name: &str) -> PathBuf {
        match &self.mkvtoolnix_dir {
            Some(dir) => dir.join(tool_name),
            None => PathBuf::from(tool_name),
        }
    }

    /// Convenience accessor: true when the success cap is disabled.
    pub fn unlimited(&self) -> bool {
        self.max_successes < 0
    }
}
