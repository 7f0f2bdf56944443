//! Core remux logic and orchestration.
//!
//! This module holds the per-container pipeline of the submux-core library:
//! deciding what to do with a container ([`plan`]), doing it safely
//! ([`execute`]), and running the whole batch with per-container fault
//! isolation ([`batch`]).

/// Remux plan construction and validity rules
pub mod plan;

/// Plan execution: tool invocation and the staged file swap
pub mod execute;

/// Batch orchestration over a list of containers
pub mod batch;

pub use batch::{process_containers, BatchReport, FailedContainer};
pub use execute::{execute, RemuxFailure};
pub use plan::{build_plan, Attachment, InvalidReason, PlanStatus, RemuxPlan};
