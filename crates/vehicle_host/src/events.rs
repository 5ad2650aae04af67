//! # Event Traits and Host Notifications
//!
//! This module defines the event infrastructure and the host notifications
//! consumed by seat plugins.
//!
//! ## Design Principles
//!
//! - **Type Safety**: All events are strongly typed with compile-time guarantees
//! - **Serialization**: Built-in JSON serialization so events can cross the
//!   host boundary the same way every other host message does
//! - **Nullable references**: the host may raise a notification with either
//!   reference missing; handlers treat that as a silent no-op

use crate::error::EventError;
use crate::types::{EntityId, PlayerId};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::any::Any;

// ============================================================================
// Event Trait
// ============================================================================

/// Core trait that all events must implement.
///
/// Events must be Send + Sync as they may be processed across multiple
/// threads. The Debug requirement ensures events can be logged.
pub trait Event: Send + Sync + Any + std::fmt::Debug {
    /// Returns the type name of this event for debugging and routing.
    fn type_name() -> &'static str
    where
        Self: Sized;

    /// Serializes the event for dispatch.
    fn serialize(&self) -> Result<Vec<u8>, EventError>;

    /// Deserializes an event from dispatch bytes.
    fn deserialize(data: &[u8]) -> Result<Self, EventError>
    where
        Self: Sized;

    /// Returns a reference to this event as `&dyn Any` for dynamic typing.
    fn as_any(&self) -> &dyn Any;
}

/// Blanket implementation of Event for types that meet the requirements.
///
/// Any type that implements Serialize + DeserializeOwned + Send + Sync + Any
/// + Debug automatically gets an Event implementation with JSON
/// serialization, so new event types only need the derives:
///
/// ```rust
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct MyEvent {
///     data: String,
/// }
/// // MyEvent now implements Event automatically!
/// ```
impl<T> Event for T
where
    T: Serialize + DeserializeOwned + Send + Sync + Any + std::fmt::Debug + 'static,
{
    fn type_name() -> &'static str {
        std::any::type_name::<T>()
    }

    fn serialize(&self) -> Result<Vec<u8>, EventError> {
        serde_json::to_vec(self).map_err(|e| {
            tracing::error!(
                "🔴 Event serialization failed for type '{}': {}",
                Self::type_name(),
                e
            );
            EventError::Serialization(e.to_string())
        })
    }

    fn deserialize(data: &[u8]) -> Result<Self, EventError> {
        serde_json::from_slice(data).map_err(|e| {
            tracing::error!(
                "🔴 Event deserialization failed for type '{}': {} ({} bytes)",
                Self::type_name(),
                e,
                data.len()
            );
            EventError::Deserialization(e.to_string())
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Host Notifications
// ============================================================================

/// Raised by the host when a player has been seated on a mountable.
///
/// Both references are nullable on the host side; an absent reference means
/// the notification carries nothing actionable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityMountedEvent {
    /// The mountable seat the player attached to, if still known
    pub mountable: Option<EntityId>,
    /// The player who mounted, if still known
    pub player: Option<PlayerId>,
    /// Host timestamp of the notification, seconds since the epoch
    pub timestamp: u64,
}

impl EntityMountedEvent {
    pub fn new(mountable: EntityId, player: PlayerId) -> Self {
        Self {
            mountable: Some(mountable),
            player: Some(player),
            timestamp: crate::utils::current_timestamp(),
        }
    }
}

/// Raised by the host at the moment a player leaves a mountable.
///
/// Same shape as [`EntityMountedEvent`]; the same nullability rules apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDismountedEvent {
    /// The mountable seat the player detached from, if still known
    pub mountable: Option<EntityId>,
    /// The player who dismounted, if still known
    pub player: Option<PlayerId>,
    /// Host timestamp of the notification, seconds since the epoch
    pub timestamp: u64,
}

impl EntityDismountedEvent {
    pub fn new(mountable: EntityId, player: PlayerId) -> Self {
        Self {
            mountable: Some(mountable),
            player: Some(player),
            timestamp: crate::utils::current_timestamp(),
        }
    }
}
