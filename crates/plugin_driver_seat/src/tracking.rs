//! # Per-Player Vehicle Tracking
//!
//! A bounded cache of the last vehicle each player was observed mounting.
//! It exists only to suppress duplicate mount notifications and to know when
//! a player has fully left a vehicle; the live mount state queried from the
//! host is always the source of truth.
//!
//! At most one entry per player. Entries are removed by the deferred
//! dismount check, and a time-based sweep evicts anything left behind when
//! the host drops a dismount notification or a player disconnects without
//! one.

use dashmap::DashMap;
use std::time::{Duration, Instant};
use vehicle_host::{EntityId, PlayerId, VehicleWorld};

#[derive(Debug, Clone, Copy)]
struct TrackedVehicle {
    vehicle: EntityId,
    seen_at: Instant,
}

/// Concurrent player → last-known-vehicle cache.
#[derive(Debug, Default)]
pub struct TrackingMap {
    entries: DashMap<PlayerId, TrackedVehicle>,
}

impl TrackingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `vehicle` as the player's current vehicle.
    ///
    /// Returns `false` when the exact same vehicle is already recorded for
    /// this player - the idempotence guard against duplicate mount
    /// notifications. Returns `true` when the entry was created or replaced.
    pub fn observe(&self, player: PlayerId, vehicle: EntityId) -> bool {
        if let Some(entry) = self.entries.get(&player) {
            if entry.vehicle == vehicle {
                return false;
            }
        }
        self.entries.insert(
            player,
            TrackedVehicle {
                vehicle,
                seen_at: Instant::now(),
            },
        );
        true
    }

    /// The vehicle currently recorded for the player, if any.
    pub fn tracked(&self, player: PlayerId) -> Option<EntityId> {
        self.entries.get(&player).map(|entry| entry.vehicle)
    }

    /// Removes the player's entry. Returns whether one existed.
    pub fn forget(&self, player: PlayerId) -> bool {
        self.entries.remove(&player).is_some()
    }

    /// Number of tracked players.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops all entries.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Evicts entries older than `ttl` whose player is no longer mounted on
    /// the tracked vehicle. Entries that are old but still accurate get
    /// their timestamp refreshed instead.
    ///
    /// Returns the number of evicted entries.
    pub fn sweep(&self, world: &dyn VehicleWorld, ttl: Duration) -> usize {
        let now = Instant::now();
        let mut evicted = 0usize;

        self.entries.retain(|player, entry| {
            if now.duration_since(entry.seen_at) <= ttl {
                return true;
            }

            let still_current = world.is_player_connected(*player)
                && world
                    .mounted_seat(*player)
                    .and_then(|seat| world.parent_vehicle(seat))
                    == Some(entry.vehicle);

            if still_current {
                entry.seen_at = now;
                true
            } else {
                evicted += 1;
                false
            }
        });

        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vehicle_host::MemoryWorld;

    #[test]
    fn observe_suppresses_the_same_vehicle_twice() {
        let tracking = TrackingMap::new();
        let player = PlayerId::new();
        let vehicle = EntityId::new();

        assert!(tracking.observe(player, vehicle));
        assert!(!tracking.observe(player, vehicle));
        assert_eq!(tracking.tracked(player), Some(vehicle));
        assert_eq!(tracking.len(), 1);
    }

    #[test]
    fn observe_replaces_a_different_vehicle() {
        let tracking = TrackingMap::new();
        let player = PlayerId::new();
        let first = EntityId::new();
        let second = EntityId::new();

        assert!(tracking.observe(player, first));
        assert!(tracking.observe(player, second));
        assert_eq!(tracking.tracked(player), Some(second));
        assert_eq!(tracking.len(), 1);
    }

    #[test]
    fn sweep_evicts_stale_entries_for_absent_players() {
        let world = MemoryWorld::new();
        let tracking = TrackingMap::new();
        let player = world.connect_player();
        let boat = world.spawn_vehicle("rowboat", &[(true, true)]);

        tracking.observe(player, boat.vehicle);
        world.disconnect_player(player);

        // Zero TTL makes every entry stale immediately.
        assert_eq!(tracking.sweep(&world, Duration::ZERO), 1);
        assert!(tracking.is_empty());
    }

    #[test]
    fn sweep_keeps_entries_that_are_still_accurate() {
        let world = MemoryWorld::new();
        let tracking = TrackingMap::new();
        let player = world.connect_player();
        let boat = world.spawn_vehicle("rowboat", &[(true, true)]);

        world.seat_player(boat.seat(0), player);
        tracking.observe(player, boat.vehicle);

        assert_eq!(tracking.sweep(&world, Duration::ZERO), 0);
        assert_eq!(tracking.tracked(player), Some(boat.vehicle));
    }
}
