//! The validated, typed request a tool is about to make.

use lla_core::ipc::{DmxRequest, MergeModeRequest, PatchRequest, UniverseNameRequest};
use lla_core::model::plugin_filter;
use lla_core::parse::dmx_values;

use crate::invocation::Mode;
use crate::options::Options;

/// One variant per mode, carrying only what that mode sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List devices, optionally for one plugin.
    DeviceInfo { plugin: Option<u32> },
    Patch(PatchRequest),
    /// Summary list, or one plugin's description when `plugin` is set.
    PluginInfo { plugin: Option<u32> },
    UniverseInfo,
    UniverseName(UniverseNameRequest),
    UniverseMerge(MergeModeRequest),
    SetDmx(DmxRequest),
}

/// A mode's required argument was missing.
///
/// The caller prints that mode's usage and exits 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("missing required arguments for {}", .0.subcommand())]
pub struct MissingArguments(pub Mode);

impl TryFrom<&Options> for Command {
    type Error = MissingArguments;

    fn try_from(opts: &Options) -> Result<Self, Self::Error> {
        let missing = MissingArguments(opts.mode);
        let universe = id(opts.universe);

        let command = match opts.mode {
            Mode::DeviceInfo => Command::DeviceInfo {
                plugin: plugin_filter(opts.plugin_id),
            },
            Mode::DevicePatch => {
                let (Some(device_id), Some(port_id)) = (id(opts.device_id), id(opts.port_id))
                else {
                    return Err(missing);
                };
                Command::Patch(PatchRequest {
                    device_id,
                    port_id,
                    action: opts.patch_action,
                    universe,
                })
            }
            Mode::PluginInfo => Command::PluginInfo {
                plugin: plugin_filter(opts.plugin_id),
            },
            Mode::UniverseInfo => Command::UniverseInfo,
            Mode::UniverseName => Command::UniverseName(UniverseNameRequest {
                universe: universe.ok_or(missing)?,
                name: opts.universe_name.clone(),
            }),
            Mode::UniverseMerge => Command::UniverseMerge(MergeModeRequest {
                universe: universe.ok_or(missing)?,
                merge_mode: opts.merge_mode,
            }),
            Mode::SetDmx => Command::SetDmx(DmxRequest {
                universe: universe.ok_or(missing)?,
                data: dmx_values(&opts.dmx),
            }),
        };
        Ok(command)
    }
}

/// Negative ids mean "not given".
fn id(value: Option<i32>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok())
}
