//! Plugins, devices, ports and universes as reported by the daemon.
//!
//! These are plain data: the daemon is the source of truth and the client
//! only renders what it was sent.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One past the highest plugin id the daemon assigns.
///
/// Plugin id `0` is reserved for "all plugins", so a usable filter lies in
/// `1..PLUGIN_ID_LAST`.
pub const PLUGIN_ID_LAST: u32 = 10;

/// Return the plugin id as a filter if it names a real plugin.
///
/// Anything outside `1..PLUGIN_ID_LAST` means "no filter".
pub fn plugin_filter(id: Option<i32>) -> Option<u32> {
    id.and_then(|id| u32::try_from(id).ok())
        .filter(|id| (1..PLUGIN_ID_LAST).contains(id))
}

/// How a universe combines several sources feeding it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Highest Takes Precedence.
    #[default]
    Htp,
    /// Latest Takes Precedence.
    Ltp,
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeMode::Htp => f.write_str("HTP"),
            MergeMode::Ltp => f.write_str("LTP"),
        }
    }
}

/// Bind or release a port's universe mapping.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchAction {
    #[default]
    Patch,
    Unpatch,
}

/// Direction of a device port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortCapability {
    In,
    Out,
}

impl fmt::Display for PortCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortCapability::In => f.write_str("IN"),
            PortCapability::Out => f.write_str("OUT"),
        }
    }
}

/// A plugin loaded by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub id: u32,
    pub name: String,
    /// Only sent when the description was explicitly requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A port on a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortInfo {
    pub id: u32,
    pub capability: PortCapability,
    /// Whether the port is currently patched to a universe.
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub universe: Option<u32>,
}

impl PortInfo {
    /// The universe this port feeds, if it is patched.
    pub fn patched_universe(&self) -> Option<u32> {
        if self.active { self.universe } else { None }
    }
}

/// A device exposed by a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub id: u32,
    pub name: String,
    pub plugin_id: u32,
    #[serde(default)]
    pub ports: Vec<PortInfo>,
}

/// A universe known to the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseInfo {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub merge_mode: MergeMode,
}
