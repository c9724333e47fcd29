// ! HTTP transport implementation for MCP
// !
// ! Module provides HTTP-based transport for MCP communication,
// ! including Server-Sent Events (SSE) for real-time communication.

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response, Sse, sse::Event},
    routing::{get, post},
};
use reqwest::Client;
use serde_json::Value;
use std::{collections::HashMap, convert::Infallible, sync::Arc, time::Duration};
use tokio::sync::{Mutex, RwLock, broadcast, mpsc};
use uuid::Uuid;

#[cfg(all(feature = "futures", feature = "tokio-stream"))]
use futures::stream::Stream;

#[cfg(feature = "tokio-stream")]
use tokio_stream::{
    StreamExt,
    wrappers::{BroadcastStream, UnboundedReceiverStream, errors::BroadcastStreamRecvError},
};

use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::{AccessTokenVerifier, AuthInfo};
use crate::core::error::{McpError, McpResult};
use crate::core::logging::ErrorContext;
use crate::protocol::types::{
    JsonRpcError, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
    JsonRpcResponseOrError, error_codes,
};
use crate::transport::event_store::{EventStore, InMemoryEventStore};
use crate::transport::traits::{ConnectionState, ServerTransport, Transport, TransportConfig};

/// Header carrying the server-assigned session identifier for the
/// Streamable HTTP transport.
const MCP_SESSION_ID_HEADER: &str = "mcp-session-id";

/// Header the client sends to declare which protocol revision it speaks.
const MCP_PROTOCOL_VERSION_HEADER: &str = "mcp-protocol-version";

/// Hard cap on a single JSON-RPC HTTP request body.
const MAX_HTTP_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Per-session bookkeeping the HTTP transport needs beyond the notification
/// broadcast channel: whether a standalone GET SSE stream is already open
/// (only one is allowed per session) and, via the stream id, which events an
/// `EventStore` has recorded for `Last-Event-ID` replay.
///
/// `closed` is notified when the session is torn down (`DELETE /mcp`) so any
/// SSE stream currently open for it can drain queued events and end instead
/// of being cut off mid-delivery.
#[derive(Debug, Clone)]
struct SessionEntry {
    standalone_stream_open: bool,
    closed: Arc<tokio::sync::Notify>,
    /// Notified by the SSE forwarding task once it has drained queued
    /// events and exited in response to `closed`.
    drained: Arc<tokio::sync::Notify>,
}

impl Default for SessionEntry {
    fn default() -> Self {
        Self {
            standalone_stream_open: false,
            closed: Arc::new(tokio::sync::Notify::new()),
            drained: Arc::new(tokio::sync::Notify::new()),
        }
    }
}

// ============================================================================
// HTTP Client Transport
// ============================================================================

/// HTTP transport for MCP clients
///
/// This transport communicates with an MCP server via HTTP requests and
/// optionally uses Server-Sent Events for real-time notifications.
#[derive(Debug)]
pub struct HttpClientTransport {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) sse_url: Option<String>,
    pub(crate) headers: HeaderMap,
    /// For tracking active requests (currently used for metrics/debugging)
    pending_requests: Arc<Mutex<HashMap<Value, tokio::sync::oneshot::Sender<JsonRpcResponse>>>>,
    notification_receiver: Option<mpsc::UnboundedReceiver<JsonRpcNotification>>,
    pub(crate) config: TransportConfig,
    state: ConnectionState,
    request_id_counter: Arc<Mutex<u64>>,
}

impl HttpClientTransport {
    /// Create a new HTTP client transport
    ///
    /// # Arguments
    /// * `base_url` - Base URL for the MCP server
    /// * `sse_url` - Optional URL for Server-Sent Events (for notifications)
    ///
    /// # Returns
    /// Result containing the transport or an error
    pub async fn new<S: AsRef<str>>(base_url: S, sse_url: Option<S>) -> McpResult<Self> {
        Self::with_config(base_url, sse_url, TransportConfig::default()).await
    }

    /// Create a new HTTP client transport with custom configuration
    ///
    /// # Arguments
    /// * `base_url` - Base URL for the MCP server
    /// * `sse_url` - Optional URL for Server-Sent Events
    /// * `config` - Transport configuration
    ///
    /// # Returns
    /// Result containing the transport or an error
    pub async fn with_config<S: AsRef<str>>(
        base_url: S,
        sse_url: Option<S>,
        config: TransportConfig,
    ) -> McpResult<Self> {
        let client_builder = Client::builder()
            .timeout(Duration::from_millis(
                config.read_timeout_ms.unwrap_or(60_000),
            ))
            .connect_timeout(Duration::from_millis(
                config.connect_timeout_ms.unwrap_or(30_000),
            ));

        // Note: reqwest doesn't have a gzip() method, it's enabled by default with features

        let client = client_builder
            .build()
            .map_err(|e| McpError::Http(format!("Failed to create HTTP client: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", "application/json".parse().unwrap());
        headers.insert("Accept", "application/json".parse().unwrap());

        // Add custom headers from config
        for (key, value) in &config.headers {
            if let (Ok(header_name), Ok(header_value)) = (
                key.parse::<axum::http::HeaderName>(),
                value.parse::<axum::http::HeaderValue>(),
            ) {
                headers.insert(header_name, header_value);
            }
        }

        let (notification_sender, notification_receiver) = mpsc::unbounded_channel();

        // Set up SSE connection for notifications if URL provided
        if let Some(sse_url) = &sse_url {
            let sse_url = sse_url.as_ref().to_string();
            let client_clone = client.clone();
            let headers_clone = headers.clone();

            tokio::spawn(async move {
                if let Err(e) = Self::handle_sse_stream(
                    client_clone,
                    sse_url,
                    headers_clone,
                    notification_sender,
                )
                .await
                {
                    tracing::error!("SSE stream error: {}", e);
                }
            });
        }

        Ok(Self {
            client,
            base_url: base_url.as_ref().to_string(),
            sse_url: sse_url.map(|s| s.as_ref().to_string()),
            headers,
            pending_requests: Arc::new(Mutex::new(HashMap::new())),
            notification_receiver: Some(notification_receiver),
            config,
            state: ConnectionState::Connected,
            request_id_counter: Arc::new(Mutex::new(0)),
        })
    }

    async fn handle_sse_stream(
        client: Client,
        sse_url: String,
        headers: HeaderMap,
        notification_sender: mpsc::UnboundedSender<JsonRpcNotification>,
    ) -> McpResult<()> {
        let mut request = client.get(&sse_url);
        for (name, value) in headers.iter() {
            // Convert axum headers to reqwest headers
            let name_str = name.as_str();
            let value_bytes = value.as_bytes();
            request = request.header(name_str, value_bytes);
        }

        let response = request
            .send()
            .await
            .map_err(|e| McpError::Http(format!("SSE connection failed: {e}")))?;

        let mut stream = response.bytes_stream();

        #[cfg(feature = "tokio-stream")]
        {
            while let Some(chunk) = stream.next().await {
                match chunk {
                    Ok(bytes) => {
                        let text = String::from_utf8_lossy(&bytes);
                        for line in text.lines() {
                            if let Some(data) = line.strip_prefix("data: ") {
                                // Remove "data: " prefix
                                if let Ok(notification) =
                                    serde_json::from_str::<JsonRpcNotification>(data)
                                {
                                    if notification_sender.send(notification).is_err() {
                                        tracing::debug!("Notification receiver dropped");
                                        return Ok(());
                                    }
                                }
                            }
                        }
                    }
                    Err(e) => {
                        tracing::error!("SSE stream error: {}", e);
                        break;
                    }
                }
            }
        }

        #[cfg(not(feature = "tokio-stream"))]
        {
            tracing::warn!("SSE streaming requires tokio-stream feature");
        }

        Ok(())
    }

    pub async fn next_request_id(&self) -> u64 {
        let mut counter = self.request_id_counter.lock().await;
        *counter += 1;
        *counter
    }

    /// Track request for metrics/debugging purposes
    async fn track_request(&self, request_id: &Value) {
        // For HTTP transport, we mainly use this for debugging and metrics
        // Since HTTP is synchronous request/response, we don't need the async
        // tracking that WebSocket uses, but we keep the interface for consistency
        let mut pending = self.pending_requests.lock().await;
        let (sender, _receiver) = tokio::sync::oneshot::channel();
        pending.insert(request_id.clone(), sender);
    }

    /// Remove tracked request
    async fn untrack_request(&self, request_id: &Value) {
        let mut pending = self.pending_requests.lock().await;
        pending.remove(request_id);
    }

    /// Get count of active requests (for debugging/metrics)
    pub async fn active_request_count(&self) -> usize {
        let pending = self.pending_requests.lock().await;
        pending.len()
    }

    #[cfg(test)]
    pub fn has_notification_receiver(&self) -> bool {
        self.notification_receiver.is_some()
    }
}

#[async_trait]
impl Transport for HttpClientTransport {
    async fn send_request(&mut self, request: JsonRpcRequest) -> McpResult<JsonRpcResponse> {
        // Generate request ID if not present or ensure we have a valid ID
        let request_with_id = if request.id == Value::Null {
            let request_id = self.next_request_id().await;
            JsonRpcRequest {
                id: Value::from(request_id),
                ..request
            }
        } else {
            request
        };

        // Create error context for logging
        let context = ErrorContext::new("http_send_request")
            .with_transport("http")
            .with_method(&request_with_id.method)
            .with_extra("request_id", request_with_id.id.clone())
            .with_extra("base_url", serde_json::Value::String(self.base_url.clone()));

        // Track the request for debugging/metrics
        self.track_request(&request_with_id.id).await;

        let url = format!("{}/mcp", self.base_url);

        let mut http_request = self.client.post(&url);

        // Apply headers from config and defaults
        for (name, value) in self.headers.iter() {
            let name_str = name.as_str();
            let value_bytes = value.as_bytes();
            http_request = http_request.header(name_str, value_bytes);
        }

        // Apply timeout from config if specified
        if let Some(timeout_ms) = self.config.read_timeout_ms {
            http_request = http_request.timeout(Duration::from_millis(timeout_ms));
        }

        let response = http_request
            .json(&request_with_id)
            .send()
            .await
            .map_err(|e| {
                // Untrack request on error
                let request_id = request_with_id.id.clone();
                let pending_requests = self.pending_requests.clone();
                tokio::spawn(async move {
                    let mut pending = pending_requests.lock().await;
                    pending.remove(&request_id);
                });

                // Create appropriate error based on the reqwest error
                let error = if e.is_timeout() {
                    McpError::timeout("HTTP request timeout")
                } else if e.is_connect() {
                    McpError::connection(format!("HTTP connection failed: {e}"))
                } else {
                    McpError::Http(format!("HTTP request failed: {e}"))
                };

                // Log error with context
                let error_clone = error.clone();
                let context_clone = context.clone();
                tokio::spawn(async move {
                    error_clone.log_with_context(context_clone).await;
                });

                error
            })?;

        if !response.status().is_success() {
            // Untrack request on HTTP error
            self.untrack_request(&request_with_id.id).await;

            let error = McpError::Http(format!(
                "HTTP error: {} {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            ));

            // Log HTTP status error
            error.log_with_context(context).await;
            return Err(error);
        }

        let json_response: JsonRpcResponse = response.json().await.map_err(|e| {
            // Untrack request on parse error
            let request_id = request_with_id.id.clone();
            let pending_requests = self.pending_requests.clone();
            tokio::spawn(async move {
                let mut pending = pending_requests.lock().await;
                pending.remove(&request_id);
            });

            let error = McpError::connection(format!("Request serialization failed: {e}"));

            // Log parse error
            let error_clone = error.clone();
            let context_clone = context.clone();
            tokio::spawn(async move {
                error_clone.log_with_context(context_clone).await;
            });

            error
        })?;

        // Validate response ID matches request ID
        if json_response.id != request_with_id.id {
            self.untrack_request(&request_with_id.id).await;
            return Err(McpError::Http(format!(
                "Response ID {:?} does not match request ID {:?}",
                json_response.id, request_with_id.id
            )));
        }

        // Untrack successful request
        self.untrack_request(&request_with_id.id).await;

        Ok(json_response)
    }

    async fn send_notification(&mut self, notification: JsonRpcNotification) -> McpResult<()> {
        let url = format!("{}/mcp/notify", self.base_url);

        let mut http_request = self.client.post(&url);

        // Apply headers from config and defaults
        for (name, value) in self.headers.iter() {
            let name_str = name.as_str();
            let value_bytes = value.as_bytes();
            http_request = http_request.header(name_str, value_bytes);
        }

        // Apply write timeout from config if specified
        if let Some(timeout_ms) = self.config.write_timeout_ms {
            http_request = http_request.timeout(Duration::from_millis(timeout_ms));
        }

        let response = http_request
            .json(&notification)
            .send()
            .await
            .map_err(|e| McpError::Http(format!("HTTP notification failed: {e}")))?;

        if !response.status().is_success() {
            return Err(McpError::Http(format!(
                "HTTP notification error: {} {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        Ok(())
    }

    async fn receive_notification(&mut self) -> McpResult<Option<JsonRpcNotification>> {
        if let Some(ref mut receiver) = self.notification_receiver {
            match receiver.try_recv() {
                Ok(notification) => Ok(Some(notification)),
                Err(mpsc::error::TryRecvError::Empty) => Ok(None),
                Err(mpsc::error::TryRecvError::Disconnected) => Err(McpError::Http(
                    "Notification channel disconnected".to_string(),
                )),
            }
        } else {
            Ok(None)
        }
    }

    async fn close(&mut self) -> McpResult<()> {
        self.state = ConnectionState::Disconnected;
        self.notification_receiver = None;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        matches!(self.state, ConnectionState::Connected)
    }

    fn connection_info(&self) -> String {
        format!(
            "HTTP transport (base: {}, sse: {:?}, state: {:?})",
            self.base_url, self.sse_url, self.state
        )
    }
}

// ============================================================================
// HTTP Server Transport
// ============================================================================

/// Shared state for HTTP server transport
#[derive(Clone)]
struct HttpServerState {
    notification_sender: broadcast::Sender<JsonRpcNotification>,
    request_handler: Option<
        Arc<
            dyn Fn(JsonRpcRequest) -> tokio::sync::oneshot::Receiver<Option<JsonRpcResponseOrError>>
                + Send
                + Sync,
        >,
    >,
    notification_handler: Option<crate::transport::traits::ServerNotificationHandler>,
    session_closed_handler: Option<crate::transport::traits::SessionClosedHandler>,
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    event_store: Arc<dyn EventStore>,
    /// `Host` allow-list for DNS-rebinding defense. `None` disables the check
    /// (default; opt in via [`HttpServerTransport::with_allowed_hosts`]).
    allowed_hosts: Option<Vec<String>>,
    /// `Origin` allow-list, same opt-in semantics as `allowed_hosts`.
    allowed_origins: Option<Vec<String>>,
    /// Bearer-token verifier. `None` disables the check (default); opt in
    /// via [`HttpServerTransport::with_token_verifier`].
    token_verifier: Option<Arc<dyn AccessTokenVerifier>>,
}

/// HTTP transport for MCP servers
///
/// This transport serves MCP requests over HTTP and provides Server-Sent Events
/// for real-time notifications to clients.
pub struct HttpServerTransport {
    bind_addr: String,
    config: TransportConfig,
    state: Arc<RwLock<HttpServerState>>,
    server_handle: Option<tokio::task::JoinHandle<()>>,
    running: Arc<RwLock<bool>>,
}

impl HttpServerTransport {
    /// Create a new HTTP server transport
    ///
    /// # Arguments
    /// * `bind_addr` - Address to bind the HTTP server to (e.g., "0.0.0.0:3000")
    ///
    /// # Returns
    /// New HTTP server transport instance
    pub fn new<S: Into<String>>(bind_addr: S) -> Self {
        Self::with_config(bind_addr, TransportConfig::default())
    }

    /// Create a new HTTP server transport with custom configuration
    ///
    /// # Arguments
    /// * `bind_addr` - Address to bind the HTTP server to
    /// * `config` - Transport configuration
    ///
    /// # Returns
    /// New HTTP server transport instance
    pub fn with_config<S: Into<String>>(bind_addr: S, config: TransportConfig) -> Self {
        let (notification_sender, _) = broadcast::channel(1000);

        Self {
            bind_addr: bind_addr.into(),
            config,
            state: Arc::new(RwLock::new(HttpServerState {
                notification_sender,
                request_handler: None,
                notification_handler: None,
                session_closed_handler: None,
                sessions: Arc::new(RwLock::new(HashMap::new())),
                event_store: Arc::new(InMemoryEventStore::new()),
                allowed_hosts: None,
                allowed_origins: None,
                token_verifier: None,
            })),
            server_handle: None,
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Restrict accepted requests to the given `Host` header values. Guards
    /// against DNS-rebinding attacks against servers bound to localhost.
    /// Disabled (all hosts accepted) unless called.
    pub async fn with_allowed_hosts(self, hosts: Vec<String>) -> Self {
        self.state.write().await.allowed_hosts = Some(hosts);
        self
    }

    /// Restrict accepted requests to the given `Origin` header values, when
    /// present. Requests without an `Origin` header (non-browser clients)
    /// are unaffected. Disabled unless called.
    pub async fn with_allowed_origins(self, origins: Vec<String>) -> Self {
        self.state.write().await.allowed_origins = Some(origins);
        self
    }

    /// Install a custom event store for SSE replay. Defaults to an
    /// in-memory store.
    pub async fn with_event_store(self, event_store: Arc<dyn EventStore>) -> Self {
        self.state.write().await.event_store = event_store;
        self
    }

    /// Require a valid `Authorization: Bearer <token>` header on every
    /// request, verified through `verifier`. Disabled (no auth) unless
    /// called.
    pub async fn with_token_verifier(self, verifier: Arc<dyn AccessTokenVerifier>) -> Self {
        self.state.write().await.token_verifier = Some(verifier);
        self
    }

    /// Set the request handler function
    ///
    /// # Arguments
    /// * `handler` - Function that processes incoming requests
    pub async fn set_request_handler<F>(&mut self, handler: F)
    where
        F: Fn(JsonRpcRequest) -> tokio::sync::oneshot::Receiver<Option<JsonRpcResponseOrError>>
            + Send
            + Sync
            + 'static,
    {
        let mut state = self.state.write().await;
        state.request_handler = Some(Arc::new(handler));
    }

    #[cfg(test)]
    pub fn get_bind_addr(&self) -> &str {
        &self.bind_addr
    }

    #[cfg(test)]
    pub fn get_config(&self) -> &TransportConfig {
        &self.config
    }
}

#[async_trait]
impl ServerTransport for HttpServerTransport {
    async fn start(&mut self) -> McpResult<()> {
        tracing::info!("Starting HTTP server on {}", self.bind_addr);

        let state = self.state.clone();
        let bind_addr = self.bind_addr.clone();
        let running = self.running.clone();
        let _config = self.config.clone();

        // Create the Axum app with configuration-based settings
        let mut app = Router::new()
            .route("/mcp", post(handle_mcp_request).delete(handle_mcp_delete))
            .route("/mcp/notify", post(handle_mcp_notification))
            .route("/mcp/events", get(handle_sse_events))
            .route("/health", get(handle_health_check))
            .layer(DefaultBodyLimit::max(MAX_HTTP_BODY_BYTES))
            .with_state(state);

        // Apply CORS configuration
        let cors_layer = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        app = app.layer(ServiceBuilder::new().layer(cors_layer).into_inner());

        // Note: Timeout configuration is handled at the HTTP client level
        // Server-side timeouts are managed by the underlying Axum/Hyper stack

        // Start the server
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| McpError::Http(format!("Failed to bind to {bind_addr}: {e}")))?;

        *running.write().await = true;

        let server_handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("HTTP server error: {}", e);
            }
        });

        self.server_handle = Some(server_handle);

        tracing::info!("HTTP server started successfully on {}", self.bind_addr);
        Ok(())
    }

    fn set_request_handler(&mut self, handler: crate::transport::traits::ServerRequestHandler) {
        let http_handler = Arc::new(move |request: JsonRpcRequest| {
            let (tx, rx) = tokio::sync::oneshot::channel();
            let handler_future = handler(request.clone());
            tokio::spawn(async move {
                let result = handler_future.await.unwrap_or_else(|e| {
                    Some(JsonRpcResponseOrError::Error(JsonRpcError::error(
                        request.id,
                        error_codes::INTERNAL_ERROR,
                        e.to_string(),
                        None,
                    )))
                });
                let _ = tx.send(result);
            });
            rx
        });

        let state = self.state.clone();
        tokio::spawn(async move {
            state.write().await.request_handler = Some(http_handler);
        });
    }

    fn set_notification_handler(
        &mut self,
        handler: crate::transport::traits::ServerNotificationHandler,
    ) {
        let state = self.state.clone();
        tokio::spawn(async move {
            state.write().await.notification_handler = Some(handler);
        });
    }

    fn set_session_closed_handler(
        &mut self,
        handler: crate::transport::traits::SessionClosedHandler,
    ) {
        let state = self.state.clone();
        tokio::spawn(async move {
            state.write().await.session_closed_handler = Some(handler);
        });
    }

    async fn send_notification(&mut self, notification: JsonRpcNotification) -> McpResult<()> {
        let state = self.state.read().await;

        if state.notification_sender.send(notification).is_err() {
            tracing::warn!("No SSE clients connected to receive notification");
        }

        Ok(())
    }

    async fn stop(&mut self) -> McpResult<()> {
        tracing::info!("Stopping HTTP server");

        *self.running.write().await = false;

        if let Some(handle) = self.server_handle.take() {
            handle.abort();
        }

        Ok(())
    }

    fn is_running(&self) -> bool {
        // Check if we have an active server handle
        self.server_handle.is_some()
    }

    fn server_info(&self) -> String {
        format!("HTTP server transport (bind: {})", self.bind_addr)
    }
}

// ============================================================================
// HTTP Route Handlers
// ============================================================================

/// Checks the `Mcp-Protocol-Version` header, if present, against the
/// revision this server speaks. Its absence is tolerated for backwards
/// compatibility with pre-2025-06-18 clients that predate the header.
fn check_protocol_version(headers: &HeaderMap) -> Result<(), StatusCode> {
    match headers
        .get(MCP_PROTOCOL_VERSION_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        None => Ok(()),
        Some(version) if version == crate::protocol::MCP_PROTOCOL_VERSION => Ok(()),
        Some(_) => Err(StatusCode::BAD_REQUEST),
    }
}

/// DNS-rebinding defense: when an allow-list is configured, reject requests
/// whose `Host`/`Origin` don't appear in it. Both checks are opt-in and
/// disabled by default so existing deployments aren't broken silently.
fn check_dns_rebinding(
    headers: &HeaderMap,
    allowed_hosts: &Option<Vec<String>>,
    allowed_origins: &Option<Vec<String>>,
) -> Result<(), StatusCode> {
    if let Some(allowed) = allowed_hosts {
        let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
        match host {
            Some(h) if allowed.iter().any(|a| a == h) => {}
            _ => return Err(StatusCode::FORBIDDEN),
        }
    }

    if let Some(allowed) = allowed_origins {
        let origin = headers.get(header::ORIGIN).and_then(|v| v.to_str().ok());
        match origin {
            Some(o) if allowed.iter().any(|a| a == o) => {}
            None => {} // non-browser clients don't send Origin
            Some(_) => return Err(StatusCode::FORBIDDEN),
        }
    }

    Ok(())
}

/// Enforces bearer-token authorization when a verifier is configured.
/// A missing or invalid `Authorization` header is rejected with 401; no
/// verifier means the check is skipped entirely (default).
async fn check_authorization(
    headers: &HeaderMap,
    verifier: &Option<Arc<dyn AccessTokenVerifier>>,
) -> Result<Option<AuthInfo>, StatusCode> {
    let Some(verifier) = verifier else {
        return Ok(None);
    };

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    verifier
        .verify_access_token(token)
        .await
        .map(Some)
        .map_err(|_| StatusCode::UNAUTHORIZED)
}

/// Resolves (and, for `initialize`, assigns) the session id for a request.
///
/// - A request carrying a known `Mcp-Session-Id` is accepted as-is.
/// - A request carrying an unknown one is rejected with 404, telling the
///   client its session expired and it must re-initialize.
/// - `initialize` with no session id mints a new one.
/// - Any other request with no session id is accepted only if the server
///   has never issued a session (stateless deployment); otherwise 400.
async fn resolve_session_id(
    headers: &HeaderMap,
    sessions: &Arc<RwLock<HashMap<String, SessionEntry>>>,
    is_initialize: bool,
) -> Result<Option<String>, StatusCode> {
    let header_value = headers
        .get(MCP_SESSION_ID_HEADER)
        .and_then(|v| v.to_str().ok());

    if let Some(id) = header_value {
        return if sessions.read().await.contains_key(id) {
            Ok(Some(id.to_string()))
        } else {
            Err(StatusCode::NOT_FOUND)
        };
    }

    if is_initialize {
        let id = Uuid::new_v4().to_string();
        sessions
            .write()
            .await
            .insert(id.clone(), SessionEntry::default());
        return Ok(Some(id));
    }

    if sessions.read().await.is_empty() {
        Ok(None)
    } else {
        Err(StatusCode::BAD_REQUEST)
    }
}

/// Handle MCP JSON-RPC requests
async fn handle_mcp_request(
    State(state): State<Arc<RwLock<HttpServerState>>>,
    headers: HeaderMap,
    Json(request): Json<JsonRpcRequest>,
) -> Result<Response, StatusCode> {
    let state_guard = state.read().await;

    check_protocol_version(&headers)?;
    check_dns_rebinding(
        &headers,
        &state_guard.allowed_hosts,
        &state_guard.allowed_origins,
    )?;
    check_authorization(&headers, &state_guard.token_verifier).await?;

    let is_initialize = request.method == "initialize";
    let session_id =
        resolve_session_id(&headers, &state_guard.sessions, is_initialize).await?;

    if let Some(ref handler) = state_guard.request_handler {
        let response_rx = handler(request);
        drop(state_guard); // Release the lock

        match response_rx.await {
            Ok(None) => {
                // Cancelled before producing a response: no JSON-RPC frame
                // for this id, but the POST still needs an HTTP status.
                Ok(StatusCode::ACCEPTED.into_response())
            }
            Ok(Some(response_or_error)) => {
                let mut http_response = match response_or_error {
                    JsonRpcResponseOrError::Response(response) => {
                        Json(JsonRpcMessage::Response(response)).into_response()
                    }
                    JsonRpcResponseOrError::Error(error) => {
                        Json(JsonRpcMessage::Error(error)).into_response()
                    }
                };
                if let Some(session_id) = session_id {
                    if let Ok(value) = HeaderValue::from_str(&session_id) {
                        http_response
                            .headers_mut()
                            .insert(MCP_SESSION_ID_HEADER, value);
                    }
                }
                Ok(http_response)
            }
            Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
        }
    } else {
        let error_response = JsonRpcError::error(
            request.id,
            error_codes::METHOD_NOT_FOUND,
            "No request handler configured".to_string(),
            None,
        );
        Ok(Json(JsonRpcMessage::Error(error_response)).into_response())
    }
}

/// Handle MCP session termination (`DELETE /mcp`)
///
/// Spec §4.4.2/§6: tearing down a session invokes the session-closed hook.
/// Any standalone SSE stream open for the session is told to drain its
/// already-queued notifications and end (§9) before the hook runs, so a
/// caller observing the hook never races a notification still in flight.
async fn handle_mcp_delete(
    State(state): State<Arc<RwLock<HttpServerState>>>,
    headers: HeaderMap,
) -> StatusCode {
    let Some(session_id) = headers
        .get(MCP_SESSION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
    else {
        return StatusCode::BAD_REQUEST;
    };
    let session_id = session_id.to_string();

    let state_guard = state.read().await;
    let removed = state_guard.sessions.write().await.remove(&session_id);
    let session_closed_handler = state_guard.session_closed_handler.clone();
    drop(state_guard);

    let Some(entry) = removed else {
        return StatusCode::NOT_FOUND;
    };

    if entry.standalone_stream_open {
        entry.closed.notify_waiters();
        // Bounded wait: a stream that never acknowledges (e.g. the client
        // already vanished) must not block session teardown forever.
        let _ = tokio::time::timeout(Duration::from_secs(2), entry.drained.notified()).await;
    }

    if let Some(handler) = session_closed_handler {
        handler(session_id).await;
    }

    StatusCode::NO_CONTENT
}

/// Handle MCP notification requests
///
/// Notifications never get a response body; `notifications/cancelled` and
/// friends are handed to the server's notification handler and forgotten.
async fn handle_mcp_notification(
    State(state): State<Arc<RwLock<HttpServerState>>>,
    Json(notification): Json<JsonRpcNotification>,
) -> StatusCode {
    let handler = state.read().await.notification_handler.clone();
    if let Some(handler) = handler {
        handler(notification).await;
    } else {
        tracing::debug!(
            "No notification handler set, dropping {}",
            notification.method
        );
    }
    StatusCode::OK
}

/// Handle Server-Sent Events for real-time notifications
///
/// Supports the standalone-stream rule (one open GET stream per session,
/// a second attempt gets 409) and resumable delivery via `Last-Event-ID`:
/// events missed while disconnected are replayed from the configured
/// [`EventStore`] before live notifications resume.
#[cfg(all(feature = "tokio-stream", feature = "futures"))]
async fn handle_sse_events(
    State(state): State<Arc<RwLock<HttpServerState>>>,
    headers: HeaderMap,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, StatusCode> {
    let state_guard = state.read().await;

    check_protocol_version(&headers)?;
    check_dns_rebinding(
        &headers,
        &state_guard.allowed_hosts,
        &state_guard.allowed_origins,
    )?;

    let session_id = headers
        .get(MCP_SESSION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let session_close_signal = if let Some(ref id) = session_id {
        let mut sessions = state_guard.sessions.write().await;
        match sessions.get_mut(id) {
            Some(entry) if entry.standalone_stream_open => return Err(StatusCode::CONFLICT),
            Some(entry) => {
                entry.standalone_stream_open = true;
                Some((entry.closed.clone(), entry.drained.clone()))
            }
            None => return Err(StatusCode::NOT_FOUND),
        }
    } else {
        None
    };

    let receiver = state_guard.notification_sender.subscribe();
    let event_store = state_guard.event_store.clone();
    let stream_id = session_id.clone().unwrap_or_else(|| "default".to_string());
    drop(state_guard);

    let last_event_id = headers
        .get("last-event-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let (tx, rx) = mpsc::unbounded_channel::<Result<Event, Infallible>>();

    if let Some(last_id) = last_event_id {
        let replayed = Arc::new(std::sync::Mutex::new(Vec::new()));
        let replayed_clone = replayed.clone();
        let _ = event_store
            .replay_events_after(&last_id, &move |event| {
                replayed_clone.lock().unwrap().push(event);
            })
            .await;

        let events = Arc::try_unwrap(replayed)
            .map(|m| m.into_inner().unwrap())
            .unwrap_or_default();

        for event in events {
            let mut sse_event = Event::default().id(event.event_id);
            sse_event = match serde_json::to_string(&event.message) {
                Ok(json) => sse_event.data(json),
                Err(_) => sse_event.data("{}"),
            };
            let _ = tx.send(Ok(sse_event));
        }
    }

    tokio::spawn(async move {
        async fn next_event(
            result: Result<JsonRpcNotification, BroadcastStreamRecvError>,
            event_store: &Arc<dyn EventStore>,
            stream_id: &str,
        ) -> Event {
            match result {
                Ok(notification) => {
                    let event_id = event_store
                        .store_event(stream_id, notification.clone())
                        .await
                        .ok();
                    let json = serde_json::to_string(&notification).unwrap_or_else(|e| {
                        tracing::error!("Failed to serialize notification: {}", e);
                        "{}".to_string()
                    });
                    let mut event = Event::default().data(json);
                    if let Some(id) = event_id {
                        event = event.id(id);
                    }
                    event
                }
                Err(_) => Event::default().data("{}"), // lagged
            }
        }

        let mut receiver = BroadcastStream::new(receiver);
        loop {
            let closed = session_close_signal.as_ref().map(|(closed, _)| closed);
            let next = match closed {
                Some(closed) => {
                    tokio::select! {
                        biased;
                        result = receiver.next() => result,
                        _ = closed.notified() => {
                            // Session torn down: drain whatever is already
                            // queued before ending the stream (spec §9).
                            while let Ok(Some(result)) = tokio::time::timeout(
                                Duration::from_millis(50),
                                receiver.next(),
                            )
                            .await
                            {
                                let sse_event = next_event(result, &event_store, &stream_id).await;
                                if tx.send(Ok(sse_event)).is_err() {
                                    break;
                                }
                            }
                            if let Some((_, drained)) = &session_close_signal {
                                drained.notify_waiters();
                            }
                            break;
                        }
                    }
                }
                None => receiver.next().await,
            };

            let Some(result) = next else { break };
            let sse_event = next_event(result, &event_store, &stream_id).await;
            if tx.send(Ok(sse_event)).is_err() {
                break;
            }
        }
    });

    Ok(Sse::new(UnboundedReceiverStream::new(rx)).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("keep-alive"),
    ))
}

/// Handle Server-Sent Events (fallback when features not available)
#[cfg(not(all(feature = "tokio-stream", feature = "futures")))]
async fn handle_sse_events(
    _state: State<Arc<RwLock<HttpServerState>>>,
    _headers: HeaderMap,
) -> StatusCode {
    StatusCode::NOT_IMPLEMENTED
}

/// Handle health check requests
async fn handle_health_check() -> Json<Value> {
    #[cfg(feature = "chrono")]
    let timestamp = chrono::Utc::now().to_rfc3339();
    #[cfg(not(feature = "chrono"))]
    let timestamp = "unavailable";

    Json(serde_json::json!({
        "status": "healthy",
        "transport": "http",
        "timestamp": timestamp
    }))
}
