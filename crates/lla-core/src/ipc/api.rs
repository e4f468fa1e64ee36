//! The request surface a tool can invoke against the daemon.

use crate::BoxFuture;
use crate::model::{DeviceInfo, PluginInfo, UniverseInfo};

use super::client::ClientError;
use super::types::{
    DeviceQuery, DmxRequest, MergeModeRequest, PatchRequest, PluginQuery, UniverseNameRequest,
};

/// One method per daemon operation.
///
/// [`LlaClient`](super::LlaClient) is the socket-backed implementation; tests
/// substitute a recording double. A daemon-side failure comes back as
/// [`ClientError::Daemon`] carrying the daemon's own message.
pub trait DaemonApi: Send + Sync {
    fn fetch_plugin_info(
        &self,
        query: PluginQuery,
    ) -> BoxFuture<'_, Result<Vec<PluginInfo>, ClientError>>;

    fn fetch_device_info(
        &self,
        query: DeviceQuery,
    ) -> BoxFuture<'_, Result<Vec<DeviceInfo>, ClientError>>;

    fn fetch_universe_info(&self) -> BoxFuture<'_, Result<Vec<UniverseInfo>, ClientError>>;

    fn patch(&self, request: PatchRequest) -> BoxFuture<'_, Result<(), ClientError>>;

    fn set_universe_name(
        &self,
        request: UniverseNameRequest,
    ) -> BoxFuture<'_, Result<(), ClientError>>;

    fn set_universe_merge_mode(
        &self,
        request: MergeModeRequest,
    ) -> BoxFuture<'_, Result<(), ClientError>>;

    fn send_dmx(&self, request: DmxRequest) -> BoxFuture<'_, Result<(), ClientError>>;
}
