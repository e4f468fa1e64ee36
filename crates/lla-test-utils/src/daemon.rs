//! A stand-in for `llad` serving the control API on a Unix socket.
//!
//! [`MockDaemon`] binds a socket inside its own temp directory, answers from
//! canned state, and records every request it receives so tests can assert
//! exactly what a tool sent (or that it sent nothing at all).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use lla_core::ipc::{
    AckResponse, DeviceQuery, DevicesResponse, DmxRequest, ErrorResponse, MergeModeRequest,
    PatchRequest, PluginQuery, PluginsResponse, UniverseNameRequest, UniversesResponse, routes,
};
use lla_core::{DeviceInfo, PluginInfo, UniverseInfo};
use tempfile::TempDir;
use tokio::net::UnixListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;

/// A request as the daemon received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedRequest {
    FetchPlugins(PluginQuery),
    FetchDevices(DeviceQuery),
    FetchUniverses,
    Patch(PatchRequest),
    UniverseName(UniverseNameRequest),
    UniverseMergeMode(MergeModeRequest),
    Dmx(DmxRequest),
}

/// Shared state behind the mock router.
#[derive(Default)]
pub struct MockState {
    pub plugins: Vec<PluginInfo>,
    pub devices: Vec<DeviceInfo>,
    pub universes: Vec<UniverseInfo>,
    /// Route path → error message the route answers with.
    pub failures: HashMap<&'static str, String>,
    /// Never answer; used to exercise client timeouts.
    pub unresponsive: bool,
    pub requests: Mutex<Vec<RecordedRequest>>,
}

impl MockState {
    fn record(&self, request: RecordedRequest) {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);
    }

    /// Answer with the configured failure or stall, if any, for `route`.
    async fn intercept(&self, route: &'static str) -> Option<Response> {
        if self.unresponsive {
            std::future::pending::<()>().await;
        }
        self.failures.get(route).map(|message| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: message.clone(),
                }),
            )
                .into_response()
        })
    }
}

/// Build the axum router serving the daemon control API from `state`.
pub fn router(state: Arc<MockState>) -> axum::Router {
    axum::Router::new()
        .route(routes::PLUGINS, get(handle_plugins))
        .route(routes::DEVICES, get(handle_devices))
        .route(routes::UNIVERSES, get(handle_universes))
        .route(routes::PATCH, post(handle_patch))
        .route(routes::UNIVERSE_NAME, post(handle_universe_name))
        .route(routes::UNIVERSE_MERGE_MODE, post(handle_merge_mode))
        .route(routes::DMX, post(handle_dmx))
        .with_state(state)
}

/// Fluent builder for [`MockDaemon`].
#[derive(Default)]
pub struct MockDaemonBuilder {
    state: MockState,
}

impl MockDaemonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve the standard fixtures from [`crate::fixtures`].
    pub fn with_fixtures(mut self) -> Self {
        self.state.plugins = crate::fixtures::plugins();
        self.state.devices = crate::fixtures::devices();
        self.state.universes = crate::fixtures::universes();
        self
    }

    pub fn plugins(mut self, plugins: Vec<PluginInfo>) -> Self {
        self.state.plugins = plugins;
        self
    }

    pub fn devices(mut self, devices: Vec<DeviceInfo>) -> Self {
        self.state.devices = devices;
        self
    }

    pub fn universes(mut self, universes: Vec<UniverseInfo>) -> Self {
        self.state.universes = universes;
        self
    }

    /// Make `route` answer with an error carrying `message`.
    pub fn fail(mut self, route: &'static str, message: &str) -> Self {
        self.state.failures.insert(route, message.to_string());
        self
    }

    /// Accept requests but never reply.
    pub fn unresponsive(mut self) -> Self {
        self.state.unresponsive = true;
        self
    }

    pub fn into_state(self) -> MockState {
        self.state
    }

    /// Bind the socket and start serving in the background.
    pub async fn spawn(self) -> MockDaemon {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let socket_path = temp_dir.path().join("llad.sock");
        let listener = UnixListener::bind(&socket_path).expect("failed to bind mock socket");
        info!(path = %socket_path.display(), "mock daemon listening");

        let state = Arc::new(self.state);
        let app = router(Arc::clone(&state));
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        MockDaemon {
            socket_path,
            state,
            shutdown_tx: Some(shutdown_tx),
            handle,
            _temp_dir: temp_dir,
        }
    }
}

/// A running mock daemon. The socket and its directory are removed on drop.
pub struct MockDaemon {
    socket_path: PathBuf,
    state: Arc<MockState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
    _temp_dir: TempDir,
}

impl MockDaemon {
    pub fn builder() -> MockDaemonBuilder {
        MockDaemonBuilder::new()
    }

    /// A daemon serving the standard fixtures.
    pub async fn with_fixtures() -> Self {
        Self::builder().with_fixtures().spawn().await
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Stop serving and wait for the server task to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let _ = (&mut self.handle).await;
    }
}

impl Drop for MockDaemon {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ── Route handlers ──────────────────────────────────────────────────────

async fn handle_plugins(
    State(state): State<Arc<MockState>>,
    Query(query): Query<PluginQuery>,
) -> Response {
    state.record(RecordedRequest::FetchPlugins(query.clone()));
    if let Some(resp) = state.intercept(routes::PLUGINS).await {
        return resp;
    }

    let plugins = state
        .plugins
        .iter()
        .filter(|p| query.plugin_id.is_none_or(|id| p.id == id))
        .map(|p| PluginInfo {
            description: p.description.clone().filter(|_| query.include_description),
            ..p.clone()
        })
        .collect();
    Json(PluginsResponse { plugins }).into_response()
}

async fn handle_devices(
    State(state): State<Arc<MockState>>,
    Query(query): Query<DeviceQuery>,
) -> Response {
    state.record(RecordedRequest::FetchDevices(query.clone()));
    if let Some(resp) = state.intercept(routes::DEVICES).await {
        return resp;
    }

    let devices = state
        .devices
        .iter()
        .filter(|d| query.plugin_id.is_none_or(|id| d.plugin_id == id))
        .cloned()
        .collect();
    Json(DevicesResponse { devices }).into_response()
}

async fn handle_universes(State(state): State<Arc<MockState>>) -> Response {
    state.record(RecordedRequest::FetchUniverses);
    if let Some(resp) = state.intercept(routes::UNIVERSES).await {
        return resp;
    }
    Json(UniversesResponse {
        universes: state.universes.clone(),
    })
    .into_response()
}

async fn handle_patch(
    State(state): State<Arc<MockState>>,
    Json(req): Json<PatchRequest>,
) -> Response {
    state.record(RecordedRequest::Patch(req));
    ack(&state, routes::PATCH).await
}

async fn handle_universe_name(
    State(state): State<Arc<MockState>>,
    Json(req): Json<UniverseNameRequest>,
) -> Response {
    state.record(RecordedRequest::UniverseName(req));
    ack(&state, routes::UNIVERSE_NAME).await
}

async fn handle_merge_mode(
    State(state): State<Arc<MockState>>,
    Json(req): Json<MergeModeRequest>,
) -> Response {
    state.record(RecordedRequest::UniverseMergeMode(req));
    ack(&state, routes::UNIVERSE_MERGE_MODE).await
}

async fn handle_dmx(State(state): State<Arc<MockState>>, Json(req): Json<DmxRequest>) -> Response {
    state.record(RecordedRequest::Dmx(req));
    ack(&state, routes::DMX).await
}

async fn ack(state: &MockState, route: &'static str) -> Response {
    if let Some(resp) = state.intercept(route).await {
        return resp;
    }
    Json(AckResponse { acknowledged: true }).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use lla_core::MergeMode;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    fn fixture_state() -> Arc<MockState> {
        Arc::new(MockDaemonBuilder::new().with_fixtures().into_state())
    }

    async fn body_json<T: serde::de::DeserializeOwned>(resp: Response) -> T {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_plugins_endpoint_summary() {
        let app = router(fixture_state());
        let req = Request::get("/plugins").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let plugins: PluginsResponse = body_json(resp).await;
        assert_eq!(plugins.plugins.len(), 3);
        assert!(plugins.plugins.iter().all(|p| p.description.is_none()));
    }

    #[tokio::test]
    async fn test_plugins_endpoint_single_with_description() {
        let state = fixture_state();
        let app = router(Arc::clone(&state));
        let req = Request::get("/plugins?plugin_id=2&include_description=true")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        let plugins: PluginsResponse = body_json(resp).await;
        assert_eq!(plugins.plugins.len(), 1);
        assert_eq!(
            plugins.plugins[0].description.as_deref(),
            Some("Sends and receives ArtNet packets.")
        );

        let recorded = state.requests.lock().unwrap().clone();
        assert_eq!(
            recorded,
            vec![RecordedRequest::FetchPlugins(PluginQuery {
                plugin_id: Some(2),
                include_description: true,
            })]
        );
    }

    #[tokio::test]
    async fn test_devices_endpoint_filters_by_plugin() {
        let app = router(fixture_state());
        let req = Request::get("/devices?plugin_id=2").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();

        let devices: DevicesResponse = body_json(resp).await;
        assert_eq!(devices.devices.len(), 1);
        assert_eq!(devices.devices[0].name, "ArtNet Node");
    }

    #[tokio::test]
    async fn test_merge_mode_endpoint_records_request() {
        let state = fixture_state();
        let app = router(Arc::clone(&state));
        let req = Request::post("/universe/merge_mode")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"universe":7,"merge_mode":"ltp"}"#))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let ack: AckResponse = body_json(resp).await;
        assert!(ack.acknowledged);
        assert_eq!(
            state.requests.lock().unwrap().as_slice(),
            &[RecordedRequest::UniverseMergeMode(MergeModeRequest {
                universe: 7,
                merge_mode: MergeMode::Ltp,
            })]
        );
    }

    #[tokio::test]
    async fn test_configured_failure() {
        let state = Arc::new(
            MockDaemonBuilder::new()
                .fail(routes::UNIVERSE_NAME, "Universe 3 doesn't exist")
                .into_state(),
        );
        let app = router(state);
        let req = Request::post("/universe/name")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"universe":3,"name":"x"}"#))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let err: ErrorResponse = body_json(resp).await;
        assert_eq!(err.error, "Universe 3 doesn't exist");
    }
}
