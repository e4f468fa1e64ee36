//! Canned daemon state shared by tests.

use lla_core::{DeviceInfo, MergeMode, PluginInfo, PortCapability, PortInfo, UniverseInfo};

pub fn plugins() -> Vec<PluginInfo> {
    vec![
        PluginInfo {
            id: 1,
            name: "Dummy Plugin".to_string(),
            description: Some("Outputs DMX to the log.".to_string()),
        },
        PluginInfo {
            id: 2,
            name: "ArtNet Plugin".to_string(),
            description: Some("Sends and receives ArtNet packets.".to_string()),
        },
        PluginInfo {
            id: 5,
            name: "Enttec Usb Pro Plugin".to_string(),
            description: Some("Drives Enttec USB Pro widgets.".to_string()),
        },
    ]
}

pub fn devices() -> Vec<DeviceInfo> {
    vec![
        DeviceInfo {
            id: 1,
            name: "Dummy Device".to_string(),
            plugin_id: 1,
            ports: vec![PortInfo {
                id: 0,
                capability: PortCapability::Out,
                active: true,
                universe: Some(1),
            }],
        },
        DeviceInfo {
            id: 2,
            name: "ArtNet Node".to_string(),
            plugin_id: 2,
            ports: vec![
                PortInfo {
                    id: 0,
                    capability: PortCapability::In,
                    active: false,
                    universe: None,
                },
                PortInfo {
                    id: 1,
                    capability: PortCapability::Out,
                    active: true,
                    universe: Some(7),
                },
            ],
        },
    ]
}

pub fn universes() -> Vec<UniverseInfo> {
    vec![
        UniverseInfo {
            id: 1,
            name: "Front Wash".to_string(),
            merge_mode: MergeMode::Htp,
        },
        UniverseInfo {
            id: 7,
            name: "Movers".to_string(),
            merge_mode: MergeMode::Ltp,
        },
    ]
}
