//! Worker-tag selection from the host's network interfaces.

use tracing::debug;

use crate::identity::WorkerId;
use crate::{Error, Result};

/// A snapshot of one network interface, as far as worker-tag selection is
/// concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceInfo {
    /// Interface name (`eth0`, `enp3s0`, ...).
    pub name: String,
    /// Whether the interface is operationally up.
    pub is_up: bool,
    /// Whether the interface is a loopback device.
    pub is_loopback: bool,
    /// Hardware address bytes; eligible interfaces carry exactly six.
    pub hardware_address: Vec<u8>,
    /// Reported link speed in Mb/s, `-1` when the driver does not know.
    pub link_speed: i64,
}

/// Enumerates the host's network interfaces.
///
/// Implementations skip interfaces they cannot inspect rather than failing
/// the whole enumeration; an empty list simply means no worker tag can be
/// auto-selected.
pub trait InterfaceSource {
    /// A snapshot of all currently known interfaces.
    fn interfaces(&self) -> Vec<InterfaceInfo>;
}

/// Interface enumeration backed by `/sys/class/net`.
///
/// On platforms without sysfs the enumeration is empty and
/// [`default_worker_id`] reports [`Error::NoEligibleWorkerId`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SysfsInterfaces;

impl InterfaceSource for SysfsInterfaces {
    #[cfg(target_os = "linux")]
    fn interfaces(&self) -> Vec<InterfaceInfo> {
        sysfs::interfaces(std::path::Path::new("/sys/class/net"))
    }

    #[cfg(not(target_os = "linux"))]
    fn interfaces(&self) -> Vec<InterfaceInfo> {
        Vec::new()
    }
}

/// Selects a worker tag from `source`: among all interfaces that are up,
/// not loopback, and carry exactly a 48-bit hardware address, the one with
/// the highest reported link speed wins.
///
/// # Errors
///
/// [`Error::NoEligibleWorkerId`] if no interface qualifies.
pub fn select_worker_id(source: &impl InterfaceSource) -> Result<WorkerId> {
    let chosen = source
        .interfaces()
        .into_iter()
        .filter(|iface| iface.is_up && !iface.is_loopback && iface.hardware_address.len() == 6)
        .max_by_key(|iface| iface.link_speed)
        .ok_or(Error::NoEligibleWorkerId)?;
    debug!(
        name = %chosen.name,
        speed = chosen.link_speed,
        "selected worker tag interface"
    );
    WorkerId::try_from(chosen.hardware_address.as_slice())
}

/// [`select_worker_id`] over the live [`SysfsInterfaces`] enumeration.
///
/// # Errors
///
/// [`Error::NoEligibleWorkerId`] if no interface qualifies.
pub fn default_worker_id() -> Result<WorkerId> {
    select_worker_id(&SysfsInterfaces)
}

#[cfg(target_os = "linux")]
mod sysfs {
    use std::fs;
    use std::path::Path;

    use super::InterfaceInfo;

    /// `IFF_LOOPBACK` bit of the interface flags word.
    const IFF_LOOPBACK: u32 = 0x8;

    pub(super) fn interfaces(root: &Path) -> Vec<InterfaceInfo> {
        let Ok(entries) = fs::read_dir(root) else {
            return Vec::new();
        };
        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                Some(read_interface(&entry.path(), name))
            })
            .collect()
    }

    fn read_interface(dir: &Path, name: String) -> InterfaceInfo {
        let read = |file: &str| fs::read_to_string(dir.join(file)).ok();
        let hardware_address = read("address")
            .map(|text| parse_address(text.trim()))
            .unwrap_or_default();
        let is_up = read("operstate").is_some_and(|state| state.trim() == "up");
        let flags = read("flags")
            .and_then(|text| u32::from_str_radix(text.trim().trim_start_matches("0x"), 16).ok())
            .unwrap_or(0);
        // Reading `speed` fails outright for interfaces without a link.
        let link_speed = read("speed")
            .and_then(|text| text.trim().parse().ok())
            .unwrap_or(-1);
        InterfaceInfo {
            name,
            is_up,
            is_loopback: flags & IFF_LOOPBACK != 0,
            hardware_address,
            link_speed,
        }
    }

    fn parse_address(text: &str) -> Vec<u8> {
        text.split(':')
            .filter_map(|octet| u8::from_str_radix(octet, 16).ok())
            .collect()
    }
}
