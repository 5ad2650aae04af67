//! # Core Type Definitions
//!
//! Fundamental types shared by the host surface and the plugins built on it.
//! Wrapper types keep the different kinds of host identifiers from being
//! confused with each other at compile time.
//!
//! ## Key Types
//!
//! - [`PlayerId`] - Unique identifier for a connected player
//! - [`EntityId`] - Unique identifier for a host entity (vehicle or seat)
//! - [`MountPoint`] - One slot in a vehicle's fixed, ordered mount point list
//! - [`LogLevel`] - Severity levels for context logging

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a player in the game world.
///
/// This is a wrapper around UUID that provides type safety and ensures
/// player IDs cannot be confused with entity IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Creates a new random player ID using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a player ID from a string representation.
    pub fn from_str(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::str::FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s)
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a host entity such as a vehicle or a mountable seat.
///
/// Entities are owned by the host; an `EntityId` is a lookup key, never an
/// ownership claim. The entity behind an id may be destroyed by the host at
/// any time, so every deferred use must re-validate liveness through
/// [`crate::world::VehicleWorld::is_entity_alive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Creates a new random entity ID using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Vehicle Model
// ============================================================================

/// One slot in a vehicle's fixed, ordered list of mount points.
///
/// A mount point may be flagged as the driver position, and may or may not
/// currently have a mountable seat object attached. Mount point lists are
/// small (single digits) and owned by the host; callers get a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountPoint {
    /// Whether this mount point is flagged as the driver position
    pub is_driver: bool,
    /// The attached mountable seat entity, if one currently exists
    pub seat: Option<EntityId>,
}

impl MountPoint {
    /// Creates a mount point with an attached seat.
    pub fn new(is_driver: bool, seat: EntityId) -> Self {
        Self {
            is_driver,
            seat: Some(seat),
        }
    }

    /// Creates a mount point with no seat object attached.
    pub fn detached(is_driver: bool) -> Self {
        Self {
            is_driver,
            seat: None,
        }
    }
}

// ============================================================================
// Logging
// ============================================================================

/// Severity levels for messages routed through the server context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}
