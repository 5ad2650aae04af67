//! # Server Context Interface
//!
//! The context is the bridge between plugin code and the host runtime. It
//! hands plugins the event system, the live world surface, the permission
//! subsystem, and a runtime handle for deferred work.
//!
//! ## Design Principles
//!
//! - **Minimal Interface**: only the services seat plugins consume
//! - **Type Safety**: all operations use strongly typed identifiers
//! - **No hidden globals**: the context is constructed at startup and passed
//!   by reference to every handler

use crate::system::EventSystem;
use crate::types::{LogLevel, PlayerId};
use crate::world::VehicleWorld;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// Server context interface providing access to core host services.
///
/// All context operations are thread-safe and can be called from multiple
/// contexts concurrently; implementations synchronize internally.
#[async_trait]
pub trait ServerContext: Send + Sync + Debug {
    /// Returns the event system shared with the host.
    ///
    /// Plugins use this for handler registration; the host uses the same
    /// instance to emit notifications.
    fn events(&self) -> Arc<EventSystem>;

    /// Returns the live vehicle world surface.
    fn world(&self) -> Arc<dyn VehicleWorld>;

    /// Logs a message through the host's logging pipeline.
    fn log(&self, level: LogLevel, message: &str);

    /// Registers a named permission with the host's permission subsystem.
    ///
    /// Registration is idempotent; registering the same name twice is
    /// harmless.
    fn register_permission(&self, permission: &str);

    /// Whether the player holds the named permission.
    fn has_permission(&self, player: PlayerId, permission: &str) -> bool;

    /// Handle to the host's async runtime for spawning deferred work.
    ///
    /// The only asynchrony in this system is fire-once delayed checks; they
    /// run on this runtime and must re-validate captured references through
    /// [`VehicleWorld`] before acting.
    fn tokio_handle(&self) -> tokio::runtime::Handle;
}
