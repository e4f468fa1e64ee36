//! Daemon control-socket client.
//!
//! The daemon exposes an HTTP/JSON API over a Unix domain socket. A tool
//! opens one connection, sends one request, renders the reply and exits.
//!
//! ```text
//! ┌────────────┐        Unix socket        ┌──────────────┐
//! │ lla-client │──────────────────────────▶│     llad     │
//! │  lla_*     │   HTTP/1.1 + JSON         │              │
//! └────────────┘                           └──────────────┘
//! ```

pub mod api;
pub mod client;
pub mod types;

pub use api::DaemonApi;
pub use client::{ClientError, LlaClient};
pub use types::*;
