//! Core library for batch remuxing of video containers using the
//! MKVToolNix command-line tools.
//!
//! This crate provides container discovery, track report scraping, subtitle
//! sidecar matching, remux planning and execution with a staged file swap,
//! batch orchestration, subtitle track extraction, and metadata-based
//! renaming.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use submux_core::{CoreConfig, CoreResult, find_processable_files, process_containers};
//! use submux_core::external::{CommandMkvinfoRunner, CommandMkvmergeRunner, MKVINFO, MKVMERGE};
//! use std::path::PathBuf;
//!
//! fn remux_all() -> CoreResult<()> {
//!     let config = CoreConfig::new(PathBuf::from("/path/to/movies"));
//!     config.validate()?;
//!
//!     let files = find_processable_files(&config.input_dir)?;
//!     let inspector = CommandMkvinfoRunner::new(config.tool_path(MKVINFO));
//!     let muxer = CommandMkvmergeRunner::new(config.tool_path(MKVMERGE));
//!
//!     let report = process_containers(&inspector, &muxer, &config, &files);
//!     println!("{} containers remuxed", report.succeeded);
//!     for failure in &report.failures {
//!         eprintln!("{}: {}", failure.path.display(), failure.reason);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod extraction;
pub mod language;
pub mod media;
pub mod processing;
pub mod rename;
pub mod subtitles;

// Re-exports for public API
pub use config::{CoreConfig, UNLIMITED};
pub use discovery::{find_mkv_files, find_processable_files};
pub use error::{CoreError, CoreResult};
pub use external::parse_track_report;
pub use extraction::extract_subtitles;
pub use media::{Track, TrackKind};
pub use processing::{
    build_plan, execute, process_containers, Attachment, BatchReport, FailedContainer,
    InvalidReason, PlanStatus, RemuxFailure, RemuxPlan,
};
pub use subtitles::{find_candidates, SubtitleCandidate};
