//! Multiplexer invocation.
//!
//! The argument list is built by the planner; this module only runs the
//! tool and maps a non-zero exit onto the error taxonomy. The trait seam
//! exists so executor tests can observe the argument list and simulate
//! failures without a real mkvmerge.

use crate::error::{CoreError, CoreResult};

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

/// Trait for running the multiplexer tool.
pub trait MkvmergeRunner {
    /// Runs the multiplexer with a fully built argument list.
    ///
    /// A non-zero exit is the sole failure signal; the diagnostic text is
    /// carried in `CoreError::ToolFailed`.
    fn run(&self, args: &[OsString]) -> CoreResult<()>;
}

/// Production implementation invoking the mkvmerge binary.
pub struct CommandMkvmergeRunner {
    tool: PathBuf,
}

impl CommandMkvmergeRunner {
    pub fn new(tool: PathBuf) -> Self {
        Self { tool }
    }
}

impl MkvmergeRunner for CommandMkvmergeRunner {
    fn run(&self, args: &[OsString]) -> CoreResult<()> {
        let output = Command::new(&self.tool)
            .args(args)
            .output()
            .map_err(|e| super::spawn_error(super::MKVMERGE, e))?;

        if !output.status.success() {
            return Err(CoreError::ToolFailed {
                tool: super::MKVMERGE.to_string(),
                stderr: super::diagnostic_text(&output),
            });
        }

        Ok(())
    }
}
