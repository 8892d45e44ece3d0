//! Report assembly: a timestamped snapshot of the collector records and the
//! deterministic plain-text rendering of it.

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::collectors::{self, format_decimal, HostSnapshot};

/// Filename the report is persisted under, relative to the working
/// directory. Overwritten on every run.
pub const REPORT_FILENAME: &str = "system_report.txt";

const BANNER_WIDTH: usize = 55;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Render the CPU / Memory section.
    pub include_utilization: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            include_utilization: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: String,
    pub snapshot: HostSnapshot,
}

impl Report {
    pub fn generate() -> Result<Report> {
        Ok(Report {
            generated_at: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            snapshot: collectors::collect_host_snapshot()?,
        })
    }

    pub fn render(&self, options: ReportOptions) -> String {
        render_report(&self.snapshot, &self.generated_at, options)
    }
}

/// Renders the fixed-layout text report. Pure: identical inputs produce
/// byte-identical output.
pub fn render_report(
    snapshot: &HostSnapshot,
    generated_at: &str,
    options: ReportOptions,
) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut lines = Vec::new();

    lines.push(banner.clone());
    lines.push("SYSTEM DIAGNOSTIC REPORT".to_string());
    lines.push(format!("Generated: {generated_at}"));
    lines.push(banner);

    let system = &snapshot.system;
    lines.push("\n[System]".to_string());
    lines.push(format!("OS: {} {}", system.os_name, system.os_release));
    if let Some(distribution) = &system.distribution {
        lines.push(format!("Distribution: {distribution}"));
    }
    lines.push(format!("Version: {}", system.os_version));
    lines.push(format!("Machine: {}", system.machine));
    lines.push(format!("Processor: {}", system.processor));

    if options.include_utilization {
        let resources = &snapshot.resources;
        lines.push("\n[CPU / Memory]".to_string());
        lines.push(format!("CPU Usage: {}%", resources.cpu_percent));
        lines.push(format!("RAM Total: {} GB", resources.ram_total_gb));
        lines.push(format!("RAM Used: {} GB", resources.ram_used_gb));
        lines.push(format!("RAM Available: {} GB", resources.ram_available_gb));
        lines.push(format!("RAM Usage: {}%", resources.ram_percent));
    }

    let network = &snapshot.network;
    lines.push("\n[Network]".to_string());
    lines.push(format!("Hostname: {}", network.hostname));
    lines.push(format!("IP Address: {}", network.ip_address));
    lines.push(format!("MAC Addresses: {}", network.mac_addresses));

    let disk = &snapshot.disk;
    lines.push("\n[Disk]".to_string());
    if let Some(device) = &disk.root_device {
        lines.push(format!("Device: {device}"));
    }
    lines.push(format!("Total: {} GB", format_decimal(disk.total_gb)));
    lines.push(format!("Used: {} GB", format_decimal(disk.used_gb)));
    lines.push(format!("Free: {} GB", format_decimal(disk.free_gb)));

    lines.push("\n[Notes]".to_string());
    lines.push("- CPU/RAM figures need the `metrics` build feature.".to_string());
    lines.push(
        "- Disk figures describe the filesystem at '/' (the working directory's volume \
         on platforms without a unified root)."
            .to_string(),
    );

    lines.join("\n")
}

pub fn write_report<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
    fs::write(path.as_ref(), contents)
        .with_context(|| format!("Failed to write report to {}", path.as_ref().display()))?;
    debug!(path = %path.as_ref().display(), "Report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::disk::DiskUsage;
    use crate::collectors::network::NetworkIdentity;
    use crate::collectors::resources::ResourceUtilization;
    use crate::collectors::system::SystemIdentity;

    fn fixture() -> HostSnapshot {
        HostSnapshot {
            system: SystemIdentity {
                os_name: "Linux".to_string(),
                os_release: "6.1.0".to_string(),
                os_version: "#1 SMP".to_string(),
                machine: "x86_64".to_string(),
                processor: "x86_64".to_string(),
                distribution: None,
            },
            network: NetworkIdentity {
                hostname: "host1".to_string(),
                ip_address: "Unavailable".to_string(),
                mac_addresses: "aa:bb:cc:dd:ee:ff".to_string(),
            },
            disk: DiskUsage {
                total_gb: 100.0,
                used_gb: 40.0,
                free_gb: 60.0,
                root_device: None,
            },
            resources: ResourceUtilization::unavailable(),
        }
    }

    #[test]
    fn test_report_contains_expected_lines_in_order() {
        let rendered = render_report(&fixture(), "2024-01-01 00:00:00", ReportOptions::default());

        let position = |needle: &str| {
            rendered
                .find(needle)
                .unwrap_or_else(|| panic!("missing line: {needle}"))
        };

        let os = position("OS: Linux 6.1.0");
        let total = position("Total: 100.0 GB");
        let hostname = position("Hostname: host1");
        let ip = position("IP Address: Unavailable");

        assert!(os < hostname);
        assert!(hostname < ip);
        assert!(ip < total);
        assert!(rendered.contains("Generated: 2024-01-01 00:00:00"));
        assert!(rendered.contains("Used: 40.0 GB"));
        assert!(rendered.contains("Free: 60.0 GB"));
    }

    #[test]
    fn test_section_order() {
        let rendered = render_report(&fixture(), "2024-01-01 00:00:00", ReportOptions::default());
        let sections = ["[System]", "[CPU / Memory]", "[Network]", "[Disk]", "[Notes]"];
        let positions: Vec<usize> = sections
            .iter()
            .map(|section| rendered.find(section).expect("missing section"))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let snapshot = fixture();
        let first = render_report(&snapshot, "2024-01-01 00:00:00", ReportOptions::default());
        let second = render_report(&snapshot, "2024-01-01 00:00:00", ReportOptions::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_utilization_section_can_be_disabled() {
        let options = ReportOptions {
            include_utilization: false,
        };
        let rendered = render_report(&fixture(), "2024-01-01 00:00:00", options);
        assert!(!rendered.contains("[CPU / Memory]"));
        assert!(rendered.contains("[Network]"));
    }

    #[test]
    fn test_placeholder_metrics_are_rendered_verbatim() {
        let rendered = render_report(&fixture(), "2024-01-01 00:00:00", ReportOptions::default());
        assert!(rendered.contains("CPU Usage: Unavailable (build with the `metrics` feature)%"));
        assert!(rendered.contains("RAM Total: Unavailable (build with the `metrics` feature) GB"));
    }

    #[test]
    fn test_optional_lines() {
        let mut snapshot = fixture();
        snapshot.system.distribution = Some("Debian GNU/Linux 12 (bookworm)".to_string());
        snapshot.disk.root_device = Some("sda1".to_string());
        let rendered = render_report(&snapshot, "2024-01-01 00:00:00", ReportOptions::default());
        assert!(rendered.contains("Distribution: Debian GNU/Linux 12 (bookworm)"));
        assert!(rendered.contains("Device: sda1"));
    }
}
