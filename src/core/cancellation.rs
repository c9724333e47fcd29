//! Outstanding-request cancellation bookkeeping.
//!
//! Mirrors the `pending_requests` / `debounce_generations` shape used
//! elsewhere in the engine: a shared map guarded by a `tokio::sync::Mutex`,
//! keyed by the JSON-RPC request id. A request that supports cancellation
//! registers a [`tokio::sync::Notify`] before it starts running; an inbound
//! `notifications/cancelled` wakes it.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, Notify};

use crate::protocol::types::RequestId;

/// Tracks in-flight cancellable requests for one connection.
///
/// Cheap to clone: the map lives behind an `Arc`, so every clone shares the
/// same bookkeeping (the same pattern `McpServer` already uses for its
/// registries and debounce counters).
#[derive(Clone, Default)]
pub struct CancellationRegistry {
    outstanding: Arc<Mutex<HashMap<RequestId, Arc<Notify>>>>,
}

impl CancellationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` as outstanding and cancellable, returning the token a
    /// handler can race its work against.
    pub async fn register(&self, id: RequestId) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.outstanding.lock().await.insert(id, notify.clone());
        notify
    }

    /// Clear the bookkeeping for `id`. Called once the request reaches any
    /// terminal outcome (success, error, or cancellation) so the map never
    /// grows unbounded.
    pub async fn complete(&self, id: &RequestId) {
        self.outstanding.lock().await.remove(id);
    }

    /// Cancel `id` if it is still outstanding. A no-op if the request
    /// already finished or was never registered — per spec, a cancellation
    /// notification arriving after the response raced past it is simply
    /// dropped, not an error.
    pub async fn cancel(&self, id: &RequestId) -> bool {
        if let Some(notify) = self.outstanding.lock().await.get(id) {
            notify.notify_waiters();
            true
        } else {
            false
        }
    }
}

/// Parameters carried by a `notifications/cancelled` message.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledNotificationParams {
    pub request_id: RequestId,
    #[serde(default)]
    pub reason: Option<String>,
}
