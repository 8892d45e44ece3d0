//! This module provides the host data collectors.
//!
//! Each collector reads one slice of ambient machine state and produces an
//! immutable record; `collect_host_snapshot` runs them in sequence.
//!
//! # Usage
//!
//! ```
//! use sysreport_rs::collect_host_snapshot;
//!
//! fn main() -> anyhow::Result<()> {
//!     let snapshot = collect_host_snapshot()?;
//!     println!("Host Snapshot: {:?}", snapshot);
//!     Ok(())
//! }
//! ```

pub mod disk;
pub mod network;
pub mod resources;
pub mod system;

use anyhow::Result;
use disk::DiskUsage;
use network::NetworkIdentity;
use resources::ResourceUtilization;
use serde::{Deserialize, Serialize};
use system::SystemIdentity;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostSnapshot {
    pub system: SystemIdentity,
    pub network: NetworkIdentity,
    pub disk: DiskUsage,
    pub resources: ResourceUtilization,
}

pub fn collect_host_snapshot() -> Result<HostSnapshot> {
    let snapshot = HostSnapshot {
        system: SystemIdentity::new(),
        network: NetworkIdentity::new(),
        disk: DiskUsage::new(disk::DISK_ROOT)?,
        resources: ResourceUtilization::new(),
    };
    debug!(hostname = %snapshot.network.hostname, "Host snapshot collected");
    Ok(snapshot)
}

const GIB: u64 = 1 << 30;

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn bytes_to_gb(bytes: u64) -> f64 {
    round2(bytes as f64 / GIB as f64)
}

/// Renders a two-decimal value the way the report prints numbers: trailing
/// zeros trimmed, but never past the first decimal place.
pub(crate) fn format_decimal(value: f64) -> String {
    let text = format!("{value:.2}");
    let trimmed = text.trim_end_matches('0');
    if let Some(stripped) = trimmed.strip_suffix('.') {
        format!("{stripped}.0")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_gb() {
        assert_eq!(bytes_to_gb(GIB), 1.0);
        assert_eq!(bytes_to_gb(100 * GIB), 100.0);
        assert_eq!(bytes_to_gb(GIB + GIB / 2), 1.5);
        assert_eq!(bytes_to_gb(0), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(100.0), 100.0);
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(100.0), "100.0");
        assert_eq!(format_decimal(40.0), "40.0");
        assert_eq!(format_decimal(33.33), "33.33");
        assert_eq!(format_decimal(33.3), "33.3");
        assert_eq!(format_decimal(0.0), "0.0");
        assert_eq!(format_decimal(0.5), "0.5");
    }
}
