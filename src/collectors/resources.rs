use serde::{Deserialize, Serialize};
use std::fmt;

use super::format_decimal;

/// Placeholder reported when the crate is built without the `metrics`
/// feature.
pub const METRICS_UNAVAILABLE: &str = "Unavailable (build with the `metrics` feature)";

/// A utilization figure: either a sampled number or a placeholder naming
/// why the number is missing. Serializes untagged, so a `Value` comes out
/// as a plain number and a placeholder as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Value(f64),
    Unavailable(String),
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Value(value) => f.write_str(&format_decimal(*value)),
            Metric::Unavailable(reason) => f.write_str(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUtilization {
    pub cpu_percent: Metric,
    pub ram_total_gb: Metric,
    pub ram_used_gb: Metric,
    pub ram_available_gb: Metric,
    pub ram_percent: Metric,
}

impl ResourceUtilization {
    /// Samples instantaneous CPU and memory utilization. Blocks the calling
    /// thread for about one second: the CPU percentage is computed over a
    /// sampling interval, not from a single read.
    #[cfg(feature = "metrics")]
    pub fn new() -> Self {
        sample_utilization(CPU_SAMPLE_INTERVAL)
    }

    #[cfg(not(feature = "metrics"))]
    pub fn new() -> Self {
        Self::unavailable()
    }

    pub fn unavailable() -> Self {
        let placeholder = || Metric::Unavailable(METRICS_UNAVAILABLE.to_string());
        ResourceUtilization {
            cpu_percent: placeholder(),
            ram_total_gb: placeholder(),
            ram_used_gb: placeholder(),
            ram_available_gb: placeholder(),
            ram_percent: placeholder(),
        }
    }
}

#[cfg(feature = "metrics")]
const CPU_SAMPLE_INTERVAL: std::time::Duration = std::time::Duration::from_secs(1);

#[cfg(feature = "metrics")]
fn sample_utilization(interval: std::time::Duration) -> ResourceUtilization {
    use super::{bytes_to_gb, round2};
    use sysinfo::System;

    let mut system = System::new();
    // CPU usage is a delta; two refreshes bracket the sampling interval
    system.refresh_cpu_usage();
    std::thread::sleep(interval);
    system.refresh_cpu_usage();
    system.refresh_memory();

    let total = system.total_memory();
    let used = system.used_memory();
    let ram_percent = if total > 0 {
        used as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    ResourceUtilization {
        cpu_percent: Metric::Value(round2(f64::from(system.global_cpu_usage()))),
        ram_total_gb: Metric::Value(bytes_to_gb(total)),
        ram_used_gb: Metric::Value(bytes_to_gb(used)),
        ram_available_gb: Metric::Value(bytes_to_gb(system.available_memory())),
        ram_percent: Metric::Value(round2(ram_percent)),
    }
}
