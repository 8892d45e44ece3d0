use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ffi::CStr;
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemIdentity {
    pub os_name: String,
    pub os_release: String,
    pub os_version: String,
    pub machine: String,
    pub processor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<String>,
}

impl SystemIdentity {
    /// Reads the identity of the running operating system. Fields whose
    /// underlying source cannot be read are left empty rather than failing
    /// the whole collection.
    pub fn new() -> Self {
        let uname = get_uname().unwrap_or_default();
        let processor = get_processor_model().unwrap_or_else(|| uname.machine.clone());
        SystemIdentity {
            os_name: uname.sysname,
            os_release: uname.release,
            os_version: uname.version,
            machine: uname.machine,
            processor,
            distribution: get_distribution(),
        }
    }
}

#[derive(Debug, Default)]
struct UnameInfo {
    sysname: String,
    release: String,
    version: String,
    machine: String,
}

fn get_uname() -> Result<UnameInfo> {
    let utsname = unsafe {
        let mut info: libc::utsname = std::mem::zeroed();
        if libc::uname(&mut info) != 0 {
            return Err(anyhow::anyhow!("Failed to get uname information"));
        }
        info
    };

    let to_string = |field: &[libc::c_char]| {
        unsafe { CStr::from_ptr(field.as_ptr()) }
            .to_str()
            .map(String::from)
            .context("Invalid UTF-8 in uname field")
    };

    Ok(UnameInfo {
        sysname: to_string(&utsname.sysname)?,
        release: to_string(&utsname.release)?,
        version: to_string(&utsname.version)?,
        machine: to_string(&utsname.machine)?,
    })
}

fn get_processor_model() -> Option<String> {
    let cpuinfo = fs::read_to_string("/proc/cpuinfo").ok()?;
    parse_cpu_model(&cpuinfo)
}

fn parse_cpu_model(cpuinfo: &str) -> Option<String> {
    cpuinfo.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        // "model name" on x86; some arm kernels expose "Processor" instead
        matches!(key.trim(), "model name" | "Processor").then(|| value.trim().to_string())
    })
}

fn get_distribution() -> Option<String> {
    let os_release = fs::read_to_string("/etc/os-release").ok()?;
    parse_pretty_name(&os_release)
}

fn parse_pretty_name(os_release: &str) -> Option<String> {
    os_release.lines().find_map(|line| {
        line.strip_prefix("PRETTY_NAME=")
            .map(|value| value.trim().trim_matches('"').to_string())
    })
}
