use pnet::datalink;
use serde::{Deserialize, Serialize};
use std::ffi::CStr;
use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};
use tracing::debug;

/// Placeholder reported when no local IPv4 address (or MAC) can be found.
pub const ADDRESS_UNAVAILABLE: &str = "Unavailable";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkIdentity {
    pub hostname: String,
    pub ip_address: String,
    pub mac_addresses: String,
}

impl NetworkIdentity {
    /// Reads the machine's hostname and best-effort local IPv4 address.
    /// Resolution failure is absorbed: the address field degrades to
    /// [`ADDRESS_UNAVAILABLE`] and the collector still returns normally.
    pub fn new() -> Self {
        let hostname = get_hostname().unwrap_or_default();
        let address = resolve_ipv4(&hostname).or_else(first_interface_ipv4);
        if address.is_none() {
            debug!(hostname = %hostname, "No local IPv4 address found");
        }
        Self::from_parts(hostname, address, get_mac_addresses())
    }

    fn from_parts(hostname: String, address: Option<Ipv4Addr>, mac_addresses: String) -> Self {
        NetworkIdentity {
            hostname,
            ip_address: address
                .map(|v4| v4.to_string())
                .unwrap_or_else(|| ADDRESS_UNAVAILABLE.to_string()),
            mac_addresses,
        }
    }
}

fn get_hostname() -> Option<String> {
    let mut buffer = [0u8; 256];
    let rc =
        unsafe { libc::gethostname(buffer.as_mut_ptr() as *mut libc::c_char, buffer.len()) };
    if rc != 0 {
        return None;
    }
    let hostname = unsafe { CStr::from_ptr(buffer.as_ptr() as *const libc::c_char) };
    hostname.to_str().ok().map(String::from)
}

fn resolve_ipv4(hostname: &str) -> Option<Ipv4Addr> {
    if hostname.is_empty() {
        return None;
    }
    // prefer IPv4; the port is irrelevant for name resolution
    (hostname, 0)
        .to_socket_addrs()
        .ok()?
        .find_map(|addr| match addr.ip() {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
}

fn first_interface_ipv4() -> Option<Ipv4Addr> {
    datalink::interfaces()
        .into_iter()
        .filter(|iface| iface.is_up() && !iface.is_loopback())
        .flat_map(|iface| iface.ips)
        .find_map(|network| match network.ip() {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
}

fn get_mac_addresses() -> String {
    let interfaces = datalink::interfaces();
    let mut mac_addresses = Vec::new();

    for iface in interfaces {
        if iface.is_loopback() {
            continue;
        }
        if let Some(mac) = iface.mac {
            mac_addresses.push(format!("{}", mac));
        }
    }

    if mac_addresses.is_empty() {
        ADDRESS_UNAVAILABLE.to_string()
    } else {
        mac_addresses.join(", ")
    }
}
