//! Track extraction via mkvextract.

use crate::error::{CoreError, CoreResult};

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Trait for running the track extraction tool.
pub trait MkvextractRunner {
    /// Extracts tracks from `container`. Each element of `track_specs` is a
    /// `<id>:<destination>` pair as understood by `mkvextract tracks`.
    fn extract(&self, container: &Path, track_specs: &[OsString]) -> CoreResult<()>;
}

/// Production implementation invoking the mkvextract binary.
pub struct CommandMkvextractRunner {
    tool: PathBuf,
}

impl CommandMkvextractRunner {
    pub fn new(tool: PathBuf) -> Self {
        Self { tool }
    }
}

impl MkvextractRunner for CommandMkvextractRunner {
    fn extract(&self, container: &Path, track_specs: &[OsString]) -> CoreResult<()> {
        let output = Command::new(&self.tool)
            .arg(container)
            .arg("tracks")
            .args(track_specs)
            .output()
            .map_err(|e| super::spawn_error(super::MKVEXTRACT, e))?;

        if !output.status.success() {
            return Err(CoreError::ToolFailed {
                tool: super::MKVEXTRACT.to_string(),
                stderr: super::diagnostic_text(&output),
            });
        }

        Ok(())
    }
}
