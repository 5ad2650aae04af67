//! # Mount and Dismount Handlers
//!
//! The decision logic behind the plugin. Each handler is a stateless
//! reaction to a host notification except for the shared [`TrackingMap`];
//! every guard short-circuits silently, matching the host convention that
//! absent or unresolvable references are no-ops rather than errors.

use crate::config::DriverSeatConfig;
use crate::permissions;
use crate::seats;
use crate::tracking::TrackingMap;
use arc_swap::ArcSwap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use vehicle_host::{EntityDismountedEvent, EntityMountedEvent, ServerContext};

/// How long a dismount is allowed to settle before the tracking entry is
/// re-checked. Covers the host's transient mount/dismount churn when a
/// player is reseated within the same vehicle.
pub const DISMOUNT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Reacts to a player-mounted notification.
///
/// Guards, in order: absent references, permission, vehicle resolution,
/// duplicate-notification suppression, already-driving, allow-list, driver
/// seat lookup. If everything passes, the player is force-mounted onto the
/// driver seat, overriding whatever seat they took.
pub fn handle_entity_mounted(
    event: EntityMountedEvent,
    context: &Arc<dyn ServerContext>,
    config: &ArcSwap<DriverSeatConfig>,
    tracking: &TrackingMap,
) {
    let (Some(mountable), Some(player)) = (event.mountable, event.player) else {
        return;
    };

    if !permissions::has_permission(context, player, permissions::USE) {
        return;
    }

    let world = context.world();

    let Some(vehicle) = world.parent_vehicle(mountable) else {
        return;
    };

    if !tracking.observe(player, vehicle) {
        debug!("🚗 Duplicate mount notification for {} on {}", player, vehicle);
        return;
    }

    if world.is_driver(vehicle, player) {
        return;
    }

    let Some(short_name) = world.vehicle_short_name(vehicle) else {
        return;
    };
    if !config.load().allows(&short_name) {
        return;
    }

    let Some(driver_seat) = seats::find_driver_seat(world.as_ref(), vehicle) else {
        return;
    };

    debug!(
        "🚗 Moving {} into driver mount point {} of {}",
        player, driver_seat.index, short_name
    );
    world.mount_player(driver_seat.seat, player);
}

/// Reacts to a player-dismounted notification.
///
/// Schedules a fire-once check after [`DISMOUNT_SETTLE_DELAY`]. The check
/// holds only lookup ids, never ownership: it re-validates that the player
/// and mountable are still live on the host, then forgets the tracking
/// entry if the player's live current vehicle no longer matches the tracked
/// one. Stale references make the check do nothing; the entry is then
/// overwritten or ignored on the next mount.
pub fn handle_entity_dismounted(
    event: EntityDismountedEvent,
    context: &Arc<dyn ServerContext>,
    tracking: Arc<TrackingMap>,
) {
    let (Some(mountable), Some(player)) = (event.mountable, event.player) else {
        return;
    };

    let world = context.world();
    context.tokio_handle().spawn(async move {
        tokio::time::sleep(DISMOUNT_SETTLE_DELAY).await;

        if !world.is_player_connected(player) || !world.is_entity_alive(mountable) {
            return;
        }

        if tracking.tracked(player).is_none() {
            return;
        }

        let current_vehicle = world
            .mounted_seat(player)
            .and_then(|seat| world.parent_vehicle(seat));

        if current_vehicle != tracking.tracked(player) {
            tracking.forget(player);
            debug!("🚗 Forgot tracked vehicle for {}", player);
        }
    });
}
