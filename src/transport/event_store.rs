// ! Event store interface for resumable Streamable-HTTP SSE delivery.
// !
// ! Implementations let the HTTP transport replay missed notifications to a
// ! client that reconnects with a `Last-Event-ID` header. Event ids are
// ! monotone within a stream and opaque across streams: a client must not
// ! assume ids from one stream are meaningful against another.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::core::error::McpResult;
use crate::protocol::types::JsonRpcNotification;

/// One replayable entry: which stream produced it, its position within that
/// stream, and the notification itself.
#[derive(Debug, Clone)]
pub struct StoredEvent {
    pub stream_id: String,
    pub event_id: String,
    pub message: JsonRpcNotification,
}

/// Append-only log of outbound SSE events, keyed by stream, supporting
/// replay from an opaque `lastEventId`.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Record `message` as the next event on `stream_id`, returning its
    /// newly assigned event id.
    async fn store_event(
        &self,
        stream_id: &str,
        message: JsonRpcNotification,
    ) -> McpResult<String>;

    /// Replay every event recorded after `last_event_id`, in order, via
    /// `send`. Returns the id of the stream `last_event_id` belongs to, or
    /// `None` if the id is unknown (a no-op replay; the caller should open a
    /// fresh stream rather than treat this as an error).
    async fn replay_events_after(
        &self,
        last_event_id: &str,
        send: &(dyn Fn(StoredEvent) + Send + Sync),
    ) -> McpResult<Option<String>>;
}

/// Simple in-memory event store. Adequate for a single-process server;
/// entries are never evicted, so long-lived deployments with an external
/// store should implement [`EventStore`] themselves.
#[derive(Default)]
pub struct InMemoryEventStore {
    streams: Mutex<HashMap<String, Vec<StoredEvent>>>,
    counters: Mutex<HashMap<String, u64>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn store_event(
        &self,
        stream_id: &str,
        message: JsonRpcNotification,
    ) -> McpResult<String> {
        let event_id = {
            let mut counters = self.counters.lock().unwrap();
            let counter = counters.entry(stream_id.to_string()).or_insert(0);
            *counter += 1;
            format!("{stream_id}_{counter}")
        };

        let mut streams = self.streams.lock().unwrap();
        streams
            .entry(stream_id.to_string())
            .or_default()
            .push(StoredEvent {
                stream_id: stream_id.to_string(),
                event_id: event_id.clone(),
                message,
            });

        Ok(event_id)
    }

    async fn replay_events_after(
        &self,
        last_event_id: &str,
        send: &(dyn Fn(StoredEvent) + Send + Sync),
    ) -> McpResult<Option<String>> {
        let streams = self.streams.lock().unwrap();

        let Some((stream_id, events)) = streams
            .iter()
            .find(|(_, events)| events.iter().any(|e| e.event_id == last_event_id))
        else {
            return Ok(None);
        };

        let position = events
            .iter()
            .position(|e| e.event_id == last_event_id)
            .unwrap();

        for event in &events[position + 1..] {
            send(event.clone());
        }

        Ok(Some(stream_id.clone()))
    }
}
