#![deny(unsafe_code)]

//! Shared test utilities for the lla workspace.
//!
//! Provides a mock daemon listening on a real Unix socket, an in-process
//! recording [`DaemonApi`](lla_core::DaemonApi), canned fixtures, config
//! builders and tracing helpers.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! lla-test-utils = { workspace = true }
//! ```

pub mod client;
pub mod config;
pub mod daemon;
pub mod fixtures;
pub mod tracing_setup;

pub use client::RecordingClient;
pub use config::TestConfigBuilder;
pub use daemon::{MockDaemon, MockDaemonBuilder, RecordedRequest};
