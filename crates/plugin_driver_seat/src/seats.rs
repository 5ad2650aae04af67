//! # Driver Seat Retrieval
//!
//! Locates the driver mount point on a vehicle. A linear scan is enough:
//! mount point lists are single-digit sized and vehicle objects are
//! transient, so there is nothing worth caching.

use vehicle_host::{EntityId, VehicleWorld};

/// A located driver seat: the attached mountable and its position in the
/// vehicle's mount point list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverSeat {
    /// The mountable seat entity attached to the driver mount point
    pub seat: EntityId,
    /// Index of the mount point in the vehicle's ordered list
    pub index: usize,
}

/// Returns the first mount point flagged as the driver position that
/// currently has a seat object attached.
///
/// Driver-flagged points without an attached seat are skipped, not treated
/// as terminal. Returns `None` when the vehicle is gone or no qualifying
/// mount point exists. If a vehicle carries several driver-flagged points
/// (not expected in practice), the first one wins.
pub fn find_driver_seat(world: &dyn VehicleWorld, vehicle: EntityId) -> Option<DriverSeat> {
    for (index, point) in world.mount_points(vehicle).into_iter().enumerate() {
        if point.is_driver {
            if let Some(seat) = point.seat {
                return Some(DriverSeat { seat, index });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use vehicle_host::MemoryWorld;

    #[test]
    fn first_driver_point_with_a_seat_wins() {
        let world = MemoryWorld::new();
        let rhib = world.spawn_vehicle(
            "rhib",
            &[(false, true), (true, true), (true, true)],
        );

        let found = find_driver_seat(&world, rhib.vehicle).expect("driver seat expected");
        assert_eq!(found.index, 1);
        assert_eq!(found.seat, rhib.seat(1));
    }

    #[test]
    fn detached_driver_points_are_skipped() {
        let world = MemoryWorld::new();
        let heli = world.spawn_vehicle(
            "scraptransporthelicopter",
            &[(true, false), (true, true)],
        );

        let found = find_driver_seat(&world, heli.vehicle).expect("driver seat expected");
        assert_eq!(found.index, 1);
    }

    #[test]
    fn no_driver_point_means_not_found() {
        let world = MemoryWorld::new();
        let boat = world.spawn_vehicle("rowboat", &[(false, true), (false, true)]);
        assert_eq!(find_driver_seat(&world, boat.vehicle), None);
    }

    #[test]
    fn absent_vehicle_means_not_found() {
        let world = MemoryWorld::new();
        assert_eq!(find_driver_seat(&world, EntityId::new()), None);
    }
}
