//! # Event System
//!
//! Central event routing for host notifications. Plugins register typed
//! handlers against named core events; the host (or a test harness standing
//! in for it) emits events by name and the system fans them out to every
//! registered handler concurrently.
//!
//! Handler failures are logged and counted, never propagated back to the
//! emitter: a misbehaving plugin must not be able to break host dispatch.

use crate::error::EventError;
use crate::events::Event;
use compact_str::CompactString;
use dashmap::DashMap;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Handler trait for processing serialized events.
///
/// Most users will not implement this directly; [`EventSystem::on_core`]
/// wraps a typed closure in a [`TypedEventHandler`] automatically.
#[async_trait::async_trait]
pub trait EventHandler: Send + Sync + 'static {
    /// Handles an event from serialized data.
    async fn handle(&self, data: &[u8]) -> Result<(), EventError>;

    /// Handler name for logging and diagnostics.
    fn handler_name(&self) -> &str;
}

/// Typed wrapper that deserializes the payload before invoking the closure.
pub struct TypedEventHandler<T, F>
where
    T: Event,
    F: Fn(T) -> Result<(), EventError> + Send + Sync + 'static,
{
    handler: F,
    name: String,
    _phantom: std::marker::PhantomData<T>,
}

impl<T, F> TypedEventHandler<T, F>
where
    T: Event,
    F: Fn(T) -> Result<(), EventError> + Send + Sync + 'static,
{
    pub fn new(name: String, handler: F) -> Self {
        Self {
            handler,
            name,
            _phantom: std::marker::PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<T, F> EventHandler for TypedEventHandler<T, F>
where
    T: Event,
    F: Fn(T) -> Result<(), EventError> + Send + Sync + 'static,
{
    async fn handle(&self, data: &[u8]) -> Result<(), EventError> {
        let event = T::deserialize(data)?;
        (self.handler)(event)
    }

    fn handler_name(&self) -> &str {
        &self.name
    }
}

/// Statistics for event system monitoring.
#[derive(Debug, Clone, Default)]
pub struct EventStats {
    pub events_emitted: u64,
    pub events_handled: u64,
    pub handler_failures: u64,
    pub total_handlers: usize,
}

/// Central event bus keyed by namespaced event names.
///
/// Registration and emission are both `&self`; the handler table uses a
/// concurrent map so plugins can register from any context.
pub struct EventSystem {
    handlers: DashMap<CompactString, smallvec::SmallVec<[Arc<dyn EventHandler>; 4]>>,
    stats: Arc<tokio::sync::RwLock<EventStats>>,
}

impl std::fmt::Debug for EventSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSystem")
            .field("registered_keys", &self.handlers.len())
            .finish()
    }
}

impl EventSystem {
    /// Creates an empty event system.
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
            stats: Arc::new(tokio::sync::RwLock::new(EventStats::default())),
        }
    }

    /// Registers a handler for a core host event.
    ///
    /// The closure receives the deserialized event. Multiple handlers may be
    /// registered for the same event name; all of them run on every emit.
    pub async fn on_core<T, F>(&self, event_name: &str, handler: F) -> Result<(), EventError>
    where
        T: Event + 'static,
        F: Fn(T) -> Result<(), EventError> + Send + Sync + 'static,
    {
        let key = CompactString::new_inline("core:") + event_name;
        let handler_name = format!("{}::{}", key, T::type_name());
        let typed: Arc<dyn EventHandler> = Arc::new(TypedEventHandler::new(handler_name, handler));

        self.handlers
            .entry(key.clone())
            .or_insert_with(smallvec::SmallVec::new)
            .push(typed);

        let mut stats = self.stats.write().await;
        stats.total_handlers += 1;

        debug!("📝 Registered handler for {}", key);
        Ok(())
    }

    /// Emits a core host event to every registered handler.
    ///
    /// Handlers run concurrently; a failing handler is logged and counted
    /// but does not affect the other handlers or the emitter.
    pub async fn emit_core<T>(&self, event_name: &str, event: &T) -> Result<(), EventError>
    where
        T: Event + serde::Serialize,
    {
        let key = CompactString::new_inline("core:") + event_name;
        let data = Arc::new(Event::serialize(event)?);

        let handlers = self.handlers.get(&key).map(|entry| entry.value().clone());

        let Some(handlers) = handlers else {
            warn!("⚠️ No handlers for event: {}", key);
            return Ok(());
        };

        debug!("📤 Emitting {} to {} handlers", key, handlers.len());

        let mut futures = FuturesUnordered::new();
        for handler in handlers.iter() {
            let handler = handler.clone();
            let data = data.clone();
            futures.push(async move {
                let name = handler.handler_name().to_string();
                if let Err(e) = handler.handle(&data).await {
                    error!("❌ Handler {} failed: {}", name, e);
                    return Err(e);
                }
                Ok(())
            });
        }

        let mut success_count = 0u64;
        let mut failure_count = 0u64;
        while let Some(result) = futures.next().await {
            match result {
                Ok(_) => success_count += 1,
                Err(_) => failure_count += 1,
            }
        }

        let mut stats = self.stats.write().await;
        stats.events_emitted += 1;
        stats.events_handled += success_count;
        stats.handler_failures += failure_count;

        Ok(())
    }

    /// Returns a snapshot of the current dispatch statistics.
    pub async fn stats(&self) -> EventStats {
        self.stats.read().await.clone()
    }

    /// Number of distinct event keys with at least one handler.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for EventSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EntityMountedEvent;
    use crate::types::{EntityId, PlayerId};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(flavor = "multi_thread")]
    async fn emit_reaches_every_registered_handler() {
        let events = EventSystem::new();
        let seen = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let seen = Arc::clone(&seen);
            events
                .on_core("entity_mounted", move |_: EntityMountedEvent| {
                    seen.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .await
                .expect("Failed to register handler");
        }

        let event = EntityMountedEvent::new(EntityId::new(), PlayerId::new());
        events
            .emit_core("entity_mounted", &event)
            .await
            .expect("Failed to emit event");

        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn handler_failure_is_isolated_from_emitter_and_peers() {
        let events = EventSystem::new();
        let seen = Arc::new(AtomicUsize::new(0));

        events
            .on_core("entity_mounted", |_: EntityMountedEvent| {
                Err(EventError::HandlerExecutionFailed("boom".into()))
            })
            .await
            .expect("Failed to register failing handler");

        let seen_ok = Arc::clone(&seen);
        events
            .on_core("entity_mounted", move |_: EntityMountedEvent| {
                seen_ok.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .await
            .expect("Failed to register handler");

        let event = EntityMountedEvent::new(EntityId::new(), PlayerId::new());
        events
            .emit_core("entity_mounted", &event)
            .await
            .expect("Emit must not propagate handler failures");

        assert_eq!(seen.load(Ordering::SeqCst), 1);
        let stats = events.stats().await;
        assert_eq!(stats.events_emitted, 1);
        assert_eq!(stats.events_handled, 1);
        assert_eq!(stats.handler_failures, 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn emit_without_handlers_is_a_no_op() {
        let events = EventSystem::new();
        let event = EntityMountedEvent::new(EntityId::new(), PlayerId::new());
        events
            .emit_core("entity_mounted", &event)
            .await
            .expect("Emit with no handlers must succeed");
        assert_eq!(events.handler_count(), 0);
    }
}
