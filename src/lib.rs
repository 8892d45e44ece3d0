//! A tool for generating plain-text host diagnostic reports.
//!
//! This crate gathers basic diagnostics about the machine it's running on
//! (operating system identity, CPU and memory utilization, network identity,
//! disk usage) and renders them into a single human-readable text report.
//! The bundled `sysreport` binary prints the report to standard output and
//! persists a copy to `system_report.txt` in the working directory.
//!
//! # Platform Support
//! - **Linux**: full support. Identity comes from `uname(2)`, `/etc/os-release`
//!   and `/proc`, disk capacity from `statvfs(2)`.
//! - On other Unix platforms the `/proc`-backed fields (processor model,
//!   distribution, root device) quietly drop out of the report.
//!
//! # Feature Flags
//! - `metrics` (default): CPU and memory utilization sampling via `sysinfo`.
//!   Built without it, the CPU / Memory fields degrade to placeholder text
//!   instead of numbers; nothing fails.

pub mod collectors;
pub mod report;

pub use collectors::{collect_host_snapshot, HostSnapshot};
pub use report::{render_report, write_report, Report, ReportOptions, REPORT_FILENAME};
