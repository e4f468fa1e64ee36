//! Socket-backed daemon client.
//!
//! [`LlaClient::connect`] opens the Unix socket and performs the HTTP/1.1
//! handshake up front, so an unreachable daemon is reported before any
//! request is shaped. The connection then carries the tool's single request.

use std::path::{Path, PathBuf};
use std::time::Duration;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::client::conn::http1::SendRequest;
use hyper::{Method, StatusCode};
use hyper_util::rt::TokioIo;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::net::UnixStream;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::BoxFuture;
use crate::build_info;
use crate::model::{DeviceInfo, PluginInfo, UniverseInfo};

use super::api::DaemonApi;
use super::types::*;

/// Errors from the daemon client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to connect to daemon socket at {path}: {source}")]
    Connect {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The daemon handled the request and reported a failure.
    #[error("{0}")]
    Daemon(String),

    #[error("no reply from daemon after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// Client for one connection to the lla daemon.
pub struct LlaClient {
    socket_path: PathBuf,
    sender: Mutex<SendRequest<Full<Bytes>>>,
}

impl LlaClient {
    /// Connect to the daemon socket and complete the HTTP handshake.
    pub async fn connect(socket_path: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let socket_path = socket_path.into();

        let stream =
            UnixStream::connect(&socket_path)
                .await
                .map_err(|e| ClientError::Connect {
                    path: socket_path.clone(),
                    source: e,
                })?;

        let (sender, conn) =
            hyper::client::conn::http1::handshake::<_, Full<Bytes>>(TokioIo::new(stream))
                .await
                .map_err(|e| ClientError::Request(format!("HTTP handshake failed: {e}")))?;

        // Drive the connection in the background
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                warn!(error = %e, "daemon connection error");
            }
        });

        debug!(path = %socket_path.display(), "connected to daemon");

        Ok(Self {
            socket_path,
            sender: Mutex::new(sender),
        })
    }

    /// The socket this client is connected to.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Send one HTTP request and return the response body.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Bytes, ClientError> {
        debug!(%method, path, "daemon request");

        let mut builder = hyper::Request::builder()
            .method(method)
            .uri(path)
            .header("host", "localhost")
            .header("user-agent", build_info::user_agent());

        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }

        let req = builder
            .body(Full::new(body.map(Bytes::from).unwrap_or_default()))
            .map_err(|e| ClientError::Request(format!("failed to build request: {e}")))?;

        let resp = self
            .sender
            .lock()
            .await
            .send_request(req)
            .await
            .map_err(|e| ClientError::Request(format!("request failed: {e}")))?;

        let status = resp.status();

        let resp_body = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| ClientError::Request(format!("failed to read response body: {e}")))?
            .to_bytes();

        debug!(%status, bytes = resp_body.len(), "daemon reply");

        if !status.is_success() {
            return Err(error_from_reply(status, &resp_body));
        }

        Ok(resp_body)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T, ClientError> {
        let body = self.request(Method::GET, path, None).await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Parse(format!("{what}: {e}")))
    }

    async fn post<B: Serialize>(&self, path: &str, payload: &B) -> Result<(), ClientError> {
        let bytes = serde_json::to_vec(payload)
            .map_err(|e| ClientError::Parse(format!("failed to serialize request: {e}")))?;
        let body = self.request(Method::POST, path, Some(bytes)).await?;
        let ack: AckResponse = serde_json::from_slice(&body)
            .map_err(|e| ClientError::Parse(format!("{path}: {e}")))?;
        if ack.acknowledged {
            Ok(())
        } else {
            Err(ClientError::Daemon(format!("request to {path} was not acknowledged")))
        }
    }
}

/// Turn a non-success reply into the daemon's own message when it sent one.
fn error_from_reply(status: StatusCode, body: &[u8]) -> ClientError {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(err) => ClientError::Daemon(err.error),
        Err(_) => ClientError::Request(format!("unexpected status: {status}")),
    }
}

impl DaemonApi for LlaClient {
    fn fetch_plugin_info(
        &self,
        query: PluginQuery,
    ) -> BoxFuture<'_, Result<Vec<PluginInfo>, ClientError>> {
        Box::pin(async move {
            let resp: PluginsResponse = self.get(&query.to_path(), "plugins").await?;
            Ok(resp.plugins)
        })
    }

    fn fetch_device_info(
        &self,
        query: DeviceQuery,
    ) -> BoxFuture<'_, Result<Vec<DeviceInfo>, ClientError>> {
        Box::pin(async move {
            let resp: DevicesResponse = self.get(&query.to_path(), "devices").await?;
            Ok(resp.devices)
        })
    }

    fn fetch_universe_info(&self) -> BoxFuture<'_, Result<Vec<UniverseInfo>, ClientError>> {
        Box::pin(async move {
            let resp: UniversesResponse = self.get(routes::UNIVERSES, "universes").await?;
            Ok(resp.universes)
        })
    }

    fn patch(&self, request: PatchRequest) -> BoxFuture<'_, Result<(), ClientError>> {
        Box::pin(async move { self.post(routes::PATCH, &request).await })
    }

    fn set_universe_name(
        &self,
        request: UniverseNameRequest,
    ) -> BoxFuture<'_, Result<(), ClientError>> {
        Box::pin(async move { self.post(routes::UNIVERSE_NAME, &request).await })
    }

    fn set_universe_merge_mode(
        &self,
        request: MergeModeRequest,
    ) -> BoxFuture<'_, Result<(), ClientError>> {
        Box::pin(async move { self.post(routes::UNIVERSE_MERGE_MODE, &request).await })
    }

    fn send_dmx(&self, request: DmxRequest) -> BoxFuture<'_, Result<(), ClientError>> {
        Box::pin(async move { self.post(routes::DMX, &request).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_missing_socket() {
        let result = LlaClient::connect("/tmp/nonexistent-llad-test.sock").await;
        match result {
            Err(ClientError::Connect { path, source }) => {
                assert_eq!(path, PathBuf::from("/tmp/nonexistent-llad-test.sock"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("connect should fail without a daemon"),
        }
    }

    #[test]
    fn test_error_from_reply_uses_daemon_message() {
        let err = error_from_reply(StatusCode::NOT_FOUND, br#"{"error":"Universe 9 not found"}"#);
        assert!(matches!(err, ClientError::Daemon(ref msg) if msg == "Universe 9 not found"));
        assert_eq!(err.to_string(), "Universe 9 not found");
    }

    #[test]
    fn test_error_from_reply_without_body() {
        let err = error_from_reply(StatusCode::BAD_GATEWAY, b"<html>");
        assert!(matches!(err, ClientError::Request(_)));
    }

    #[test]
    fn test_timeout_message() {
        let err = ClientError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "no reply from daemon after 30s");
    }
}
