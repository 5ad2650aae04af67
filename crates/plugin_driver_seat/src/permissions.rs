//! # Permissions
//!
//! Named permissions this plugin registers with the host's permission
//! subsystem.

use std::sync::Arc;
use vehicle_host::{PlayerId, ServerContext};

/// Permission required for a player to be auto-moved into the driver seat.
pub const USE: &str = "alwaysdriverseat.use";

const PERMISSIONS: &[&str] = &[USE];

/// Registers every permission this plugin uses.
pub fn register_permissions(context: &Arc<dyn ServerContext>) {
    for permission in PERMISSIONS {
        context.register_permission(permission);
    }
}

/// Whether the player holds the named permission.
pub fn has_permission(context: &Arc<dyn ServerContext>, player: PlayerId, permission: &str) -> bool {
    context.has_permission(player, permission)
}
