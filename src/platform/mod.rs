//! Platform collaborators
//!
//! The network manager is the only piece of the device reached through
//! external commands. Screens talk to it through the `NetworkManager` trait.

mod nmcli;

pub use nmcli::Nmcli;

/// One access point from a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    pub ssid: String,
    pub security: String,
    pub signal: u8,
}

impl Network {
    /// Open networks report no security, or "--"
    pub fn is_open(&self) -> bool {
        matches!(self.security.trim(), "" | "--")
    }

    /// List label, e.g. "HomeNet [Sec]"
    pub fn label(&self) -> String {
        let kind = if self.is_open() { "Open" } else { "Sec" };
        format!("{} [{}]", self.ssid, kind)
    }
}

/// Wi-Fi scan/connect and connection profile management
pub trait NetworkManager {
    /// Fresh scan; blank SSIDs are never returned
    fn scan(&mut self) -> Vec<Network>;

    /// Connect to `ssid`; `None` or an empty password connects without one
    fn connect(&mut self, ssid: &str, password: Option<&str>) -> bool;

    fn list_profiles(&mut self) -> Vec<String>;

    fn delete_profile(&mut self, name: &str) -> bool;
}

/// Delete every connection profile whose name is not in `keep`.
/// Returns the number of profiles deleted.
pub fn cleanup_profiles(nm: &mut dyn NetworkManager, keep: &[String]) -> usize {
    let mut deleted = 0;
    for profile in nm.list_profiles() {
        if keep.iter().any(|k| *k == profile) {
            continue;
        }
        if nm.delete_profile(&profile) {
            log::info!("deleted connection profile {:?}", profile);
            deleted += 1;
        } else {
            log::warn!("could not delete connection profile {:?}", profile);
        }
    }
    deleted
}
