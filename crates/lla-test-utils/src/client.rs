//! An in-process [`DaemonApi`] that records calls instead of sending them.

use std::sync::Mutex;

use lla_core::ipc::{
    DeviceQuery, DmxRequest, MergeModeRequest, PatchRequest, PluginQuery, UniverseNameRequest,
};
use lla_core::{BoxFuture, ClientError, DaemonApi, DeviceInfo, PluginInfo, UniverseInfo};

use crate::daemon::RecordedRequest;

/// Answers from fixtures (or with a fixed daemon error) and remembers
/// every call it saw.
#[derive(Default)]
pub struct RecordingClient {
    plugins: Vec<PluginInfo>,
    devices: Vec<DeviceInfo>,
    universes: Vec<UniverseInfo>,
    error: Option<String>,
    calls: Mutex<Vec<RecordedRequest>>,
}

impl RecordingClient {
    /// A client with no data that succeeds on every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// A client answering from [`crate::fixtures`].
    pub fn with_fixtures() -> Self {
        Self {
            plugins: crate::fixtures::plugins(),
            devices: crate::fixtures::devices(),
            universes: crate::fixtures::universes(),
            ..Self::default()
        }
    }

    /// A client on which every call fails with the daemon message `error`.
    pub fn failing(error: &str) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::default()
        }
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn answer<T>(&self, call: RecordedRequest, value: T) -> Result<T, ClientError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
        match &self.error {
            Some(msg) => Err(ClientError::Daemon(msg.clone())),
            None => Ok(value),
        }
    }
}

impl DaemonApi for RecordingClient {
    fn fetch_plugin_info(
        &self,
        query: PluginQuery,
    ) -> BoxFuture<'_, Result<Vec<PluginInfo>, ClientError>> {
        let plugins = self
            .plugins
            .iter()
            .filter(|p| query.plugin_id.is_none_or(|id| p.id == id))
            .cloned()
            .collect();
        let result = self.answer(RecordedRequest::FetchPlugins(query), plugins);
        Box::pin(async move { result })
    }

    fn fetch_device_info(
        &self,
        query: DeviceQuery,
    ) -> BoxFuture<'_, Result<Vec<DeviceInfo>, ClientError>> {
        let devices = self
            .devices
            .iter()
            .filter(|d| query.plugin_id.is_none_or(|id| d.plugin_id == id))
            .cloned()
            .collect();
        let result = self.answer(RecordedRequest::FetchDevices(query), devices);
        Box::pin(async move { result })
    }

    fn fetch_universe_info(&self) -> BoxFuture<'_, Result<Vec<UniverseInfo>, ClientError>> {
        let result = self.answer(RecordedRequest::FetchUniverses, self.universes.clone());
        Box::pin(async move { result })
    }

    fn patch(&self, request: PatchRequest) -> BoxFuture<'_, Result<(), ClientError>> {
        let result = self.answer(RecordedRequest::Patch(request), ());
        Box::pin(async move { result })
    }

    fn set_universe_name(
        &self,
        request: UniverseNameRequest,
    ) -> BoxFuture<'_, Result<(), ClientError>> {
        let result = self.answer(RecordedRequest::UniverseName(request), ());
        Box::pin(async move { result })
    }

    fn set_universe_merge_mode(
        &self,
        request: MergeModeRequest,
    ) -> BoxFuture<'_, Result<(), ClientError>> {
        let result = self.answer(RecordedRequest::UniverseMergeMode(request), ());
        Box::pin(async move { result })
    }

    fn send_dmx(&self, request: DmxRequest) -> BoxFuture<'_, Result<(), ClientError>> {
        let result = self.answer(RecordedRequest::Dmx(request), ());
        Box::pin(async move { result })
    }
}
