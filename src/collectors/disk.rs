use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ffi::CString;
use std::fs::File;
use std::io::{BufRead, BufReader};

use super::bytes_to_gb;

/// Filesystem root the usage figures describe. On platforms without a
/// unified root this resolves to the volume of the working directory.
pub const DISK_ROOT: &str = "/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskUsage {
    pub total_gb: f64,
    pub used_gb: f64,
    pub free_gb: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_device: Option<String>,
}

impl DiskUsage {
    pub fn new(path: &str) -> Result<Self> {
        let (total, used, free) = read_fs_stats(path)?;
        Ok(DiskUsage {
            root_device: get_root_device().ok(),
            ..DiskUsage::from_bytes(total, used, free)
        })
    }

    fn from_bytes(total: u64, used: u64, free: u64) -> Self {
        DiskUsage {
            total_gb: bytes_to_gb(total),
            used_gb: bytes_to_gb(used),
            free_gb: bytes_to_gb(free),
            root_device: None,
        }
    }
}

fn read_fs_stats(path: &str) -> Result<(u64, u64, u64)> {
    let c_path = CString::new(path).context("Filesystem path contains a NUL byte")?;
    let stats = unsafe {
        let mut stats: libc::statvfs = std::mem::zeroed();
        if libc::statvfs(c_path.as_ptr(), &mut stats) != 0 {
            return Err(anyhow::anyhow!("Failed to stat filesystem at {}", path));
        }
        stats
    };

    // free is the space available to unprivileged users (f_bavail), while
    // used counts the reserved blocks too, so used + free may fall short of
    // total on filesystems with a root reserve
    let fragment_size = stats.f_frsize as u64;
    let total = stats.f_blocks as u64 * fragment_size;
    let used = (stats.f_blocks as u64).saturating_sub(stats.f_bfree as u64) * fragment_size;
    let free = stats.f_bavail as u64 * fragment_size;
    Ok((total, used, free))
}

fn get_root_device() -> Result<String> {
    BufReader::new(File::open("/proc/mounts")?)
        .lines()
        .find_map(|line| {
            let line = line.ok()?;
            let mut fields = line.split_whitespace();
            if let (Some(device), Some(DISK_ROOT)) = (fields.next(), fields.next()) {
                Some(device.strip_prefix("/dev/").unwrap_or(device).to_string())
            } else {
                None
            }
        })
        .ok_or_else(|| anyhow::anyhow!("Root file system device not found"))
}
