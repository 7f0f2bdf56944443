// submux-core/tests/common/mod.rs
//
// Mock runners shared by the integration tests. They stand in for the
// MKVToolNix binaries so the pipeline can be exercised against real
// temporary directories without external tools.

#![allow(dead_code)]

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use submux_core::error::{CoreError, CoreResult};
use submux_core::external::{MkvextractRunner, MkvinfoRunner, MkvmergeRunner};

/// mkvinfo stand-in returning a fixed report text.
pub struct MockInspector {
    pub report: String,
}

impl MockInspector {
    pub fn new(report: &str) -> Self {
        Self {
            report: report.to_string(),
        }
    }
}

impl MkvinfoRunner for MockInspector {
    fn inspect(&self, _container: &Path) -> CoreResult<String> {
        Ok(self.report.clone())
    }
}

/// mkvmerge stand-in: records every argument list and, on success, writes a
/// dummy rebuilt file at the `--output` path like the real tool would.
pub struct MockMuxer {
    pub fail_with: Option<String>,
    pub write_output: bool,
    pub calls: RefCell<Vec<Vec<OsString>>>,
}

impl MockMuxer {
    pub fn succeeding() -> Self {
        Self {
            fail_with: None,
            write_output: true,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(stderr: &str) -> Self {
        Self {
            fail_with: Some(stderr.to_string()),
            write_output: true,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Exits successfully without producing the staging output, as if the
    /// file vanished between the tool exiting and the swap.
    pub fn succeeding_without_output() -> Self {
        Self {
            fail_with: None,
            write_output: false,
            calls: RefCell::new(Vec::new()),
        }
    }
}

/// Content the mock writes to the staging output.
pub const REBUILT_CONTENT: &[u8] = b"rebuilt container";

impl MkvmergeRunner for MockMuxer {
    fn run(&self, args: &[OsString]) -> CoreResult<()> {
        self.calls.borrow_mut().push(args.to_vec());

        if let Some(stderr) = &self.fail_with {
            return Err(CoreError::ToolFailed {
                tool: "mkvmerge".to_string(),
                stderr: stderr.clone(),
            });
        }

        if self.write_output {
            let output = args
                .iter()
                .position(|a| a == "--output")
                .and_then(|pos| args.get(pos + 1))
                .expect("mock muxer invoked without --output");
            fs::write(PathBuf::from(output), REBUILT_CONTENT).expect("mock muxer output write");
        }
        Ok(())
    }
}

/// mkvextract stand-in recording each invocation.
#[derive(Default)]
pub struct MockExtractor {
    pub calls: RefCell<Vec<(PathBuf, Vec<OsString>)>>,
}

impl MkvextractRunner for MockExtractor {
    fn extract(&self, container: &Path, track_specs: &[OsString]) -> CoreResult<()> {
        self.calls
            .borrow_mut()
            .push((container.to_path_buf(), track_specs.to_vec()));
        Ok(())
    }
}
