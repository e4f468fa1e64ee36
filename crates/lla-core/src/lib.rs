#![deny(unsafe_code)]

//! Core types and daemon client for the lla command-line tools.
//!
//! The lla daemon (`llad`) owns plugins, devices and universes. The tools in
//! this workspace never manage any of that themselves: they shape one request,
//! send it over the daemon's control socket, and hand the reply back to the
//! caller for rendering.

use std::future::Future;
use std::pin::Pin;

/// A type-erased, `Send`-safe, boxed future for object-safe async traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Compile-time build metadata (version, source revision, profile).
pub mod build_info;
/// Daemon control-socket client and wire types.
pub mod ipc;
/// Plugins, devices, ports and universes as reported by the daemon.
pub mod model;
/// Lenient numeric parsing and DMX value tokenizing.
pub mod parse;

pub use ipc::{ClientError, DaemonApi, LlaClient};
pub use model::{
    DeviceInfo, MergeMode, PatchAction, PluginInfo, PortCapability, PortInfo, UniverseInfo,
};
