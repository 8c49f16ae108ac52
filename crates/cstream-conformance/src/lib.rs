//! Conformance tooling for cstream-core.
//!
//! This crate provides:
//! - Scenario execution: drive the wrapper through its observable contracts
//!   on the host and record pass/fail results
//! - Report generation: human-readable + machine-readable conformance reports
//! - Structured logging: JSONL log records for suite runs
//! - Runtime configuration: env-driven run mode

#![forbid(unsafe_code)]

pub mod config;
pub mod report;
pub mod scenario;
pub mod structured_log;

pub use config::RunMode;
pub use report::{ConformanceReport, ScenarioSummary};
pub use scenario::{ScenarioError, ScenarioResult, run_all};
pub use structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
