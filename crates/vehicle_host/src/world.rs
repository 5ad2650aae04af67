//! # Host Query/Action Surface
//!
//! The [`VehicleWorld`] trait is the plugin-facing view of the host's live
//! vehicle state. Every query answers from the host's current truth at call
//! time; nothing here is cached on the plugin side.
//!
//! ## Liveness
//!
//! Entity and player ids are lookup keys, not ownership. The host may tear
//! down any object between the event that carried an id and a deferred use
//! of it, so [`VehicleWorld::is_entity_alive`] and
//! [`VehicleWorld::is_player_connected`] exist for re-validation before any
//! delayed access.

use crate::types::{EntityId, MountPoint, PlayerId};
use std::fmt::Debug;

/// Read/act surface over the host's vehicle and mount state.
///
/// Queries are synchronous: the host answers them inline on its dispatch
/// context, mirroring how event handlers run to completion without
/// suspension.
pub trait VehicleWorld: Send + Sync + Debug {
    /// Resolves the vehicle that owns a mountable seat.
    ///
    /// Returns `None` when the seat does not exist or its parent entity is
    /// not a vehicle.
    fn parent_vehicle(&self, seat: EntityId) -> Option<EntityId>;

    /// Returns the vehicle's short prefab name, its type identifier.
    fn vehicle_short_name(&self, vehicle: EntityId) -> Option<String>;

    /// Snapshot of the vehicle's fixed, ordered mount point list.
    ///
    /// Empty when the vehicle does not exist.
    fn mount_points(&self, vehicle: EntityId) -> Vec<MountPoint>;

    /// Whether the player currently occupies the driver position of the
    /// given vehicle.
    fn is_driver(&self, vehicle: EntityId, player: PlayerId) -> bool;

    /// The mountable seat the player is currently attached to, if any.
    fn mounted_seat(&self, player: PlayerId) -> Option<EntityId>;

    /// Force-mounts the player onto the given seat.
    ///
    /// Fire and forget: the host either performs the relocation or treats it
    /// as a no-op. No outcome is reported back.
    fn mount_player(&self, seat: EntityId, player: PlayerId);

    /// Whether the entity behind the id still exists on the host.
    fn is_entity_alive(&self, entity: EntityId) -> bool;

    /// Whether the player is still connected to the host.
    fn is_player_connected(&self, player: PlayerId) -> bool;
}
