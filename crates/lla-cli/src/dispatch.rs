//! Turn a [`Command`] into exactly one daemon request.

use lla_core::ipc::{DeviceQuery, PluginQuery};
use lla_core::{BoxFuture, ClientError, DaemonApi, DeviceInfo, PluginInfo, UniverseInfo};
use tracing::debug;

use crate::command::Command;

/// What a successful request brought back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `filter` is set when one plugin's description was asked for.
    Plugins {
        plugins: Vec<PluginInfo>,
        filter: Option<u32>,
    },
    Devices(Vec<DeviceInfo>),
    Universes(Vec<UniverseInfo>),
    /// An action the daemon acknowledged.
    Done,
}

/// The reply still to be awaited.
pub type PendingReply<'a> = BoxFuture<'a, Result<Reply, ClientError>>;

/// Issue the request for `command`.
///
/// Exactly one [`DaemonApi`] method is called before this returns; the
/// request goes out when the returned future is first polled. Returns `None`
/// when there is nothing to send (a DMX command without any values).
pub fn dispatch<'a>(api: &'a dyn DaemonApi, command: &Command) -> Option<PendingReply<'a>> {
    debug!(?command, "dispatching");

    let pending: PendingReply<'a> = match command {
        Command::DeviceInfo { plugin } => {
            let fetch = api.fetch_device_info(DeviceQuery { plugin_id: *plugin });
            Box::pin(async move { fetch.await.map(Reply::Devices) })
        }
        Command::PluginInfo { plugin } => {
            let filter = *plugin;
            let fetch = api.fetch_plugin_info(PluginQuery {
                plugin_id: filter,
                include_description: filter.is_some(),
            });
            Box::pin(async move {
                fetch
                    .await
                    .map(|plugins| Reply::Plugins { plugins, filter })
            })
        }
        Command::UniverseInfo => {
            let fetch = api.fetch_universe_info();
            Box::pin(async move { fetch.await.map(Reply::Universes) })
        }
        Command::Patch(request) => acknowledged(api.patch(request.clone())),
        Command::UniverseName(request) => acknowledged(api.set_universe_name(request.clone())),
        Command::UniverseMerge(request) => {
            acknowledged(api.set_universe_merge_mode(request.clone()))
        }
        Command::SetDmx(request) if request.data.is_empty() => return None,
        Command::SetDmx(request) => acknowledged(api.send_dmx(request.clone())),
    };

    Some(pending)
}

fn acknowledged(ack: BoxFuture<'_, Result<(), ClientError>>) -> PendingReply<'_> {
    Box::pin(async move { ack.await.map(|()| Reply::Done) })
}
