//! # In-Memory Reference Host
//!
//! A self-contained [`VehicleWorld`] and [`ServerContext`] implementation
//! backed by concurrent maps. Test suites drive it as a stand-in for the
//! real host runtime: spawn vehicles, seat players, kill entities, and
//! assert on the force-mount calls the plugin issued.
//!
//! The world keeps the same truth model as a real host: occupancy and
//! liveness answer from current state, and destroying an entity immediately
//! invalidates every id that pointed at it.

use crate::context::ServerContext;
use crate::system::EventSystem;
use crate::types::{EntityId, LogLevel, MountPoint, PlayerId};
use crate::world::VehicleWorld;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, trace, warn};

// ============================================================================
// World
// ============================================================================

#[derive(Debug, Clone)]
struct VehicleRecord {
    short_name: String,
    slots: Vec<MountPoint>,
}

/// Handle returned by [`MemoryWorld::spawn_vehicle`].
#[derive(Debug, Clone)]
pub struct SpawnedVehicle {
    /// The vehicle entity id
    pub vehicle: EntityId,
    /// Seat entity ids in mount point order; `None` for detached slots
    pub seats: Vec<Option<EntityId>>,
}

impl SpawnedVehicle {
    /// The seat at mount point `index`, panicking if the slot is detached.
    /// Test-harness convenience.
    pub fn seat(&self, index: usize) -> EntityId {
        self.seats[index].expect("mount point has no seat attached")
    }
}

/// In-memory vehicle world.
#[derive(Debug, Default)]
pub struct MemoryWorld {
    vehicles: DashMap<EntityId, VehicleRecord>,
    seat_owners: DashMap<EntityId, EntityId>,
    occupancy: DashMap<PlayerId, EntityId>,
    connected: DashMap<PlayerId, ()>,
    mount_calls: Mutex<Vec<(EntityId, PlayerId)>>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a connected player.
    pub fn connect_player(&self) -> PlayerId {
        let player = PlayerId::new();
        self.connected.insert(player, ());
        player
    }

    /// Marks a player as disconnected and clears their occupancy.
    pub fn disconnect_player(&self, player: PlayerId) {
        self.connected.remove(&player);
        self.occupancy.remove(&player);
    }

    /// Spawns a vehicle with the given mount point layout.
    ///
    /// Each `(is_driver, has_seat)` pair becomes one mount point, in order.
    pub fn spawn_vehicle(&self, short_name: &str, layout: &[(bool, bool)]) -> SpawnedVehicle {
        let vehicle = EntityId::new();
        let mut slots = Vec::with_capacity(layout.len());
        let mut seats = Vec::with_capacity(layout.len());

        for &(is_driver, has_seat) in layout {
            if has_seat {
                let seat = EntityId::new();
                self.seat_owners.insert(seat, vehicle);
                slots.push(MountPoint::new(is_driver, seat));
                seats.push(Some(seat));
            } else {
                slots.push(MountPoint::detached(is_driver));
                seats.push(None);
            }
        }

        self.vehicles.insert(
            vehicle,
            VehicleRecord {
                short_name: short_name.to_string(),
                slots,
            },
        );

        debug!("🚗 Spawned {} with {} mount points", short_name, layout.len());
        SpawnedVehicle { vehicle, seats }
    }

    /// Destroys a vehicle or seat entity.
    ///
    /// Destroying a vehicle takes its seats down with it; occupants of any
    /// removed seat are unseated, matching host teardown behavior.
    pub fn destroy_entity(&self, entity: EntityId) {
        if let Some((_, record)) = self.vehicles.remove(&entity) {
            for slot in &record.slots {
                if let Some(seat) = slot.seat {
                    self.seat_owners.remove(&seat);
                    self.occupancy.retain(|_, occupied| *occupied != seat);
                }
            }
            return;
        }

        if let Some((seat, vehicle)) = self.seat_owners.remove(&entity) {
            if let Some(mut record) = self.vehicles.get_mut(&vehicle) {
                for slot in record.slots.iter_mut() {
                    if slot.seat == Some(seat) {
                        slot.seat = None;
                    }
                }
            }
            self.occupancy.retain(|_, occupied| *occupied != seat);
        }
    }

    /// Places a player on a seat directly, as the host does when it handles
    /// a mount action itself.
    pub fn seat_player(&self, seat: EntityId, player: PlayerId) {
        self.occupancy.insert(player, seat);
    }

    /// Removes a player from whatever seat they occupy.
    pub fn unseat_player(&self, player: PlayerId) {
        self.occupancy.remove(&player);
    }

    /// Every force-mount call issued through [`VehicleWorld::mount_player`],
    /// oldest first.
    pub fn mount_calls(&self) -> Vec<(EntityId, PlayerId)> {
        self.mount_calls.lock().unwrap().clone()
    }

    /// Clears the recorded force-mount calls.
    pub fn clear_mount_calls(&self) {
        self.mount_calls.lock().unwrap().clear();
    }
}

impl VehicleWorld for MemoryWorld {
    fn parent_vehicle(&self, seat: EntityId) -> Option<EntityId> {
        let vehicle = *self.seat_owners.get(&seat)?;
        self.vehicles.contains_key(&vehicle).then_some(vehicle)
    }

    fn vehicle_short_name(&self, vehicle: EntityId) -> Option<String> {
        self.vehicles.get(&vehicle).map(|r| r.short_name.clone())
    }

    fn mount_points(&self, vehicle: EntityId) -> Vec<MountPoint> {
        self.vehicles
            .get(&vehicle)
            .map(|r| r.slots.clone())
            .unwrap_or_default()
    }

    fn is_driver(&self, vehicle: EntityId, player: PlayerId) -> bool {
        let Some(seat) = self.occupancy.get(&player).map(|s| *s) else {
            return false;
        };
        let Some(record) = self.vehicles.get(&vehicle) else {
            return false;
        };
        record
            .slots
            .iter()
            .any(|slot| slot.is_driver && slot.seat == Some(seat))
    }

    fn mounted_seat(&self, player: PlayerId) -> Option<EntityId> {
        self.occupancy.get(&player).map(|s| *s)
    }

    fn mount_player(&self, seat: EntityId, player: PlayerId) {
        trace!("💺 mount_player: seat={} player={}", seat, player);
        self.mount_calls.lock().unwrap().push((seat, player));
        if self.seat_owners.contains_key(&seat) {
            self.occupancy.insert(player, seat);
        }
    }

    fn is_entity_alive(&self, entity: EntityId) -> bool {
        self.vehicles.contains_key(&entity) || self.seat_owners.contains_key(&entity)
    }

    fn is_player_connected(&self, player: PlayerId) -> bool {
        self.connected.contains_key(&player)
    }
}

// ============================================================================
// Context
// ============================================================================

/// In-memory server context wrapping a [`MemoryWorld`] and a permission
/// table.
#[derive(Debug)]
pub struct MemoryHost {
    events: Arc<EventSystem>,
    world: Arc<MemoryWorld>,
    registered_permissions: DashMap<String, ()>,
    grants: DashMap<(PlayerId, String), ()>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            events: Arc::new(EventSystem::new()),
            world: Arc::new(MemoryWorld::new()),
            registered_permissions: DashMap::new(),
            grants: DashMap::new(),
        }
    }

    /// The concrete world, for test setup that needs the builder methods.
    pub fn memory_world(&self) -> Arc<MemoryWorld> {
        Arc::clone(&self.world)
    }

    /// Grants a named permission to a player.
    pub fn grant(&self, player: PlayerId, permission: &str) {
        self.grants.insert((player, permission.to_string()), ());
    }

    /// Revokes a named permission from a player.
    pub fn revoke(&self, player: PlayerId, permission: &str) {
        self.grants.remove(&(player, permission.to_string()));
    }

    /// Whether the named permission has been registered.
    pub fn permission_registered(&self, permission: &str) -> bool {
        self.registered_permissions.contains_key(permission)
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServerContext for MemoryHost {
    fn events(&self) -> Arc<EventSystem> {
        Arc::clone(&self.events)
    }

    fn world(&self) -> Arc<dyn VehicleWorld> {
        Arc::clone(&self.world) as Arc<dyn VehicleWorld>
    }

    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Trace => trace!("{}", message),
            LogLevel::Debug => debug!("{}", message),
            LogLevel::Info => info!("{}", message),
            LogLevel::Warn => warn!("{}", message),
            LogLevel::Error => error!("{}", message),
        }
    }

    fn register_permission(&self, permission: &str) {
        self.registered_permissions.insert(permission.to_string(), ());
    }

    fn has_permission(&self, player: PlayerId, permission: &str) -> bool {
        self.grants.contains_key(&(player, permission.to_string()))
    }

    fn tokio_handle(&self) -> tokio::runtime::Handle {
        tokio::runtime::Handle::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_preserves_mount_point_order() {
        let world = MemoryWorld::new();
        let boat = world.spawn_vehicle("rowboat", &[(false, true), (true, true), (true, false)]);

        let points = world.mount_points(boat.vehicle);
        assert_eq!(points.len(), 3);
        assert!(!points[0].is_driver);
        assert!(points[1].is_driver);
        assert_eq!(points[1].seat, boat.seats[1]);
        assert!(points[2].is_driver);
        assert_eq!(points[2].seat, None);
    }

    #[test]
    fn occupancy_answers_driver_and_mounted_queries() {
        let world = MemoryWorld::new();
        let player = world.connect_player();
        let heli = world.spawn_vehicle("minicopter.entity", &[(true, true), (false, true)]);

        world.seat_player(heli.seat(1), player);
        assert!(!world.is_driver(heli.vehicle, player));
        assert_eq!(world.mounted_seat(player), Some(heli.seat(1)));

        world.seat_player(heli.seat(0), player);
        assert!(world.is_driver(heli.vehicle, player));
    }

    #[test]
    fn destroying_a_vehicle_invalidates_its_seats_and_occupants() {
        let world = MemoryWorld::new();
        let player = world.connect_player();
        let rhib = world.spawn_vehicle("rhib", &[(true, true)]);
        let seat = rhib.seat(0);

        world.seat_player(seat, player);
        assert!(world.is_entity_alive(seat));

        world.destroy_entity(rhib.vehicle);
        assert!(!world.is_entity_alive(rhib.vehicle));
        assert!(!world.is_entity_alive(seat));
        assert_eq!(world.parent_vehicle(seat), None);
        assert_eq!(world.mounted_seat(player), None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn host_permission_table_round_trip() {
        let host = MemoryHost::new();
        let world = host.memory_world();
        let player = world.connect_player();

        host.register_permission("alwaysdriverseat.use");
        assert!(host.permission_registered("alwaysdriverseat.use"));

        assert!(!host.has_permission(player, "alwaysdriverseat.use"));
        host.grant(player, "alwaysdriverseat.use");
        assert!(host.has_permission(player, "alwaysdriverseat.use"));
        host.revoke(player, "alwaysdriverseat.use");
        assert!(!host.has_permission(player, "alwaysdriverseat.use"));
    }
}
