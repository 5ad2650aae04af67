//! # Vehicle Host System
//!
//! Host-integration layer for vehicle seat plugins. This crate carries
//! everything a seat plugin consumes from the game-server runtime:
//!
//! - **Core Types** - [`PlayerId`], [`EntityId`], [`MountPoint`]
//! - **Event System** - typed registration and dispatch for host
//!   notifications ([`EntityMountedEvent`], [`EntityDismountedEvent`])
//! - **World Surface** - [`VehicleWorld`], the live query/action contract
//!   over vehicles, seats, and occupancy
//! - **Server Context** - [`ServerContext`], the bridge to logging, the
//!   permission subsystem, and the async runtime
//! - **Plugin Lifecycle** - [`SimplePlugin`] and [`PluginError`]
//! - **Reference Host** - [`memory`], an in-memory world/context pair used
//!   by test suites as a stand-in for the real runtime
//!
//! ## Quick Start Example
//!
//! ```rust,no_run
//! use vehicle_host::{EntityMountedEvent, EventSystem};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let events = Arc::new(EventSystem::new());
//!
//! events
//!     .on_core("entity_mounted", |event: EntityMountedEvent| {
//!         println!("mounted: {:?}", event);
//!         Ok(())
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
pub mod events;
pub mod memory;
pub mod plugin;
pub mod system;
pub mod types;
pub mod utils;
pub mod world;

// Re-exports for convenience
pub use context::ServerContext;
pub use error::EventError;
pub use events::{EntityDismountedEvent, EntityMountedEvent, Event};
pub use memory::{MemoryHost, MemoryWorld, SpawnedVehicle};
pub use plugin::{PluginError, SimplePlugin};
pub use system::{EventStats, EventSystem};
pub use types::{EntityId, LogLevel, MountPoint, PlayerId};
pub use utils::current_timestamp;
pub use world::VehicleWorld;

/// Crate version, for host/plugin compatibility reporting.
pub const VEHICLE_HOST_VERSION: &str = env!("CARGO_PKG_VERSION");
