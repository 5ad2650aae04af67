//! # Always Driver Seat Plugin
//!
//! Forces players into the driver's seat when they mount certain vehicles.
//!
//! ## Overview
//!
//! The plugin reacts to two host notifications:
//!
//! - **entity_mounted**: if the player holds the use permission, the vehicle
//!   type is on the configured allow-list, and the player isn't already the
//!   driver, the player is moved onto the vehicle's driver mount point.
//! - **entity_dismounted**: after a short settle delay, the per-player
//!   vehicle tracking entry is dropped once the player has really left the
//!   vehicle.
//!
//! ## State
//!
//! The only state beyond the immutable configuration is the
//! [`tracking::TrackingMap`], a bounded per-player cache of the last
//! observed vehicle used to suppress duplicate mount notifications. A
//! periodic sweep evicts entries the host never sent a dismount for.
//!
//! ## Module Organization
//!
//! - [`config`] - allow-list loading, versioning, and migration
//! - [`handlers`] - the mount/dismount decision logic
//! - [`seats`] - driver mount point lookup
//! - [`tracking`] - the per-player vehicle cache
//! - [`permissions`] - permission names and registration

use arc_swap::ArcSwap;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;
use vehicle_host::{
    EntityDismountedEvent, EntityMountedEvent, EventSystem, LogLevel, PluginError, ServerContext,
    SimplePlugin,
};

pub mod config;
pub mod handlers;
pub mod permissions;
pub mod seats;
pub mod tracking;


use config::DriverSeatConfig;
use tracking::TrackingMap;

/// Running plugin version; persisted configs older than this get migrated.
pub const PLUGIN_VERSION: &str = "1.1.1";

/// Default location of the persisted configuration document.
pub const DEFAULT_CONFIG_PATH: &str = "config/always_driver_seat.json";

/// How often the defensive tracking sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Age past which an unrefreshed tracking entry is eligible for eviction.
const TRACKING_TTL: Duration = Duration::from_secs(300);

/// The Always Driver Seat plugin.
///
/// Holds the loaded allow-list (swapped wholesale on config migration, never
/// mutated in place) and the per-player tracking cache shared with the
/// registered handlers.
pub struct DriverSeatPlugin {
    name: String,
    config_path: PathBuf,
    config: Arc<ArcSwap<DriverSeatConfig>>,
    tracking: Arc<TrackingMap>,
    sweep_task: Mutex<Option<JoinHandle<()>>>,
}

impl DriverSeatPlugin {
    /// Creates the plugin with an explicit config file location.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            name: "always_driver_seat".to_string(),
            config_path: config_path.into(),
            config: Arc::new(ArcSwap::from_pointee(DriverSeatConfig::default_for(
                PLUGIN_VERSION,
            ))),
            tracking: Arc::new(TrackingMap::new()),
            sweep_task: Mutex::new(None),
        }
    }

    /// Snapshot of the active configuration.
    pub fn config(&self) -> Arc<DriverSeatConfig> {
        self.config.load_full()
    }
}

impl Default for DriverSeatPlugin {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH)
    }
}

#[async_trait]
impl SimplePlugin for DriverSeatPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        PLUGIN_VERSION
    }

    async fn register_handlers(
        &mut self,
        events: Arc<EventSystem>,
        context: Arc<dyn ServerContext>,
    ) -> Result<(), PluginError> {
        let config = Arc::clone(&self.config);
        let tracking = Arc::clone(&self.tracking);
        let mount_context = Arc::clone(&context);
        events
            .on_core("entity_mounted", move |event: EntityMountedEvent| {
                handlers::handle_entity_mounted(event, &mount_context, &config, &tracking);
                Ok(())
            })
            .await
            .map_err(|e| PluginError::ExecutionError(e.to_string()))?;

        let tracking = Arc::clone(&self.tracking);
        let dismount_context = Arc::clone(&context);
        events
            .on_core("entity_dismounted", move |event: EntityDismountedEvent| {
                handlers::handle_entity_dismounted(event, &dismount_context, Arc::clone(&tracking));
                Ok(())
            })
            .await
            .map_err(|e| PluginError::ExecutionError(e.to_string()))?;

        debug!("💺 DriverSeatPlugin: mount/dismount handlers registered");
        Ok(())
    }

    async fn on_init(&mut self, context: Arc<dyn ServerContext>) -> Result<(), PluginError> {
        let loaded = config::load_or_create(&self.config_path, PLUGIN_VERSION)
            .map_err(|e| PluginError::InitializationFailed(e.to_string()))?;
        context.log(
            LogLevel::Info,
            &format!(
                "💺 DriverSeatPlugin: allow-list holds {} vehicle types",
                loaded.vehicle_short_prefab_names.len()
            ),
        );
        self.config.store(Arc::new(loaded));

        permissions::register_permissions(&context);

        // Defensive eviction for entries whose dismount notification the
        // host never delivered (e.g. players disconnecting mid-flight).
        let tracking = Arc::clone(&self.tracking);
        let world = context.world();
        let task = context.tokio_handle().spawn(async move {
            let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
            ticker.tick().await; // first tick fires immediately
            loop {
                ticker.tick().await;
                let evicted = tracking.sweep(world.as_ref(), TRACKING_TTL);
                if evicted > 0 {
                    debug!("💺 Swept {} stale tracking entries", evicted);
                }
            }
        });
        *self.sweep_task.lock().unwrap() = Some(task);

        context.log(LogLevel::Info, "💺 DriverSeatPlugin: ready");
        Ok(())
    }

    async fn on_shutdown(&mut self, context: Arc<dyn ServerContext>) -> Result<(), PluginError> {
        if let Some(task) = self.sweep_task.lock().unwrap().take() {
            task.abort();
        }
        context.log(
            LogLevel::Info,
            &format!(
                "💺 DriverSeatPlugin: shutting down, {} players still tracked",
                self.tracking.len()
            ),
        );
        self.tracking.clear();
        Ok(())
    }
}
