//! Request/response bodies and routes of the daemon control API.
//!
//! Everything here is serialized as JSON over the Unix domain socket.

use serde::{Deserialize, Serialize};

use crate::model::{DeviceInfo, MergeMode, PatchAction, PluginInfo, UniverseInfo};

/// Route paths served by the daemon.
pub mod routes {
    pub const PLUGINS: &str = "/plugins";
    pub const DEVICES: &str = "/devices";
    pub const UNIVERSES: &str = "/universes";
    pub const PATCH: &str = "/patch";
    pub const UNIVERSE_NAME: &str = "/universe/name";
    pub const UNIVERSE_MERGE_MODE: &str = "/universe/merge_mode";
    pub const DMX: &str = "/dmx";
}

/// Query parameters for [`routes::PLUGINS`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginQuery {
    #[serde(default)]
    pub plugin_id: Option<u32>,
    #[serde(default)]
    pub include_description: bool,
}

impl PluginQuery {
    /// Render as a request path including the query string.
    pub fn to_path(&self) -> String {
        match self.plugin_id {
            Some(id) => format!(
                "{}?plugin_id={id}&include_description={}",
                routes::PLUGINS,
                self.include_description
            ),
            None if self.include_description => {
                format!("{}?include_description=true", routes::PLUGINS)
            }
            None => routes::PLUGINS.to_string(),
        }
    }
}

/// Query parameters for [`routes::DEVICES`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceQuery {
    #[serde(default)]
    pub plugin_id: Option<u32>,
}

impl DeviceQuery {
    /// Render as a request path including the query string.
    pub fn to_path(&self) -> String {
        match self.plugin_id {
            Some(id) => format!("{}?plugin_id={id}", routes::DEVICES),
            None => routes::DEVICES.to_string(),
        }
    }
}

/// Plugin listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginsResponse {
    pub plugins: Vec<PluginInfo>,
}

/// Device listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesResponse {
    pub devices: Vec<DeviceInfo>,
}

/// Universe listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniversesResponse {
    pub universes: Vec<UniverseInfo>,
}

/// Patch or unpatch a device port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchRequest {
    pub device_id: u32,
    pub port_id: u32,
    pub action: PatchAction,
    /// Target universe; the daemon picks its default when absent.
    #[serde(default)]
    pub universe: Option<u32>,
}

/// Rename a universe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseNameRequest {
    pub universe: u32,
    pub name: String,
}

/// Change a universe's merge mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeModeRequest {
    pub universe: u32,
    pub merge_mode: MergeMode,
}

/// Write channel values to a universe, starting at channel 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DmxRequest {
    pub universe: u32,
    pub data: Vec<u8>,
}

/// Acknowledgement for requests that carry no payload back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub acknowledged: bool,
}

/// Error body sent with any non-success status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
