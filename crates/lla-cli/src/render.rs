//! Plain-text tables for daemon replies.

use std::io::{self, Write};

use lla_core::{DeviceInfo, PluginInfo, UniverseInfo};

const PLUGIN_RULE_WIDTH: usize = 38;
const UNIVERSE_RULE_WIDTH: usize = 58;

fn rule<W: Write>(out: &mut W, width: usize) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(width))
}

/// The plugin summary table.
///
/// The header says `Device Name`; that is what the classic tool printed.
pub fn plugin_list<W: Write>(out: &mut W, plugins: &[PluginInfo]) -> io::Result<()> {
    writeln!(out, "   ID\tDevice Name")?;
    rule(out, PLUGIN_RULE_WIDTH)?;
    for plugin in plugins {
        writeln!(out, "{:>5}\t{}", plugin.id, plugin.name)?;
    }
    rule(out, PLUGIN_RULE_WIDTH)
}

/// The description of every plugin in `plugins` whose id is `id`.
pub fn plugin_descriptions<W: Write>(
    out: &mut W,
    plugins: &[PluginInfo],
    id: u32,
) -> io::Result<()> {
    for plugin in plugins.iter().filter(|p| p.id == id) {
        writeln!(out, "{}", plugin.description.as_deref().unwrap_or_default())?;
    }
    Ok(())
}

pub fn device_list<W: Write>(out: &mut W, devices: &[DeviceInfo]) -> io::Result<()> {
    for device in devices {
        writeln!(out, "Device {}: {}", device.id, device.name)?;
        for port in &device.ports {
            write!(out, "  port {}, cap {}", port.id, port.capability)?;
            if let Some(universe) = port.patched_universe() {
                write!(out, ", universe {universe}")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

/// The universe table with names right-aligned to 30 columns.
pub fn universe_list<W: Write>(out: &mut W, universes: &[UniverseInfo]) -> io::Result<()> {
    writeln!(out, "   ID\t{:>30}\t\tMerge Mode", "Name")?;
    rule(out, UNIVERSE_RULE_WIDTH)?;
    for universe in universes {
        writeln!(
            out,
            "{:>5}\t{:>30}\t\t{}",
            universe.id, universe.name, universe.merge_mode
        )?;
    }
    rule(out, UNIVERSE_RULE_WIDTH)
}
