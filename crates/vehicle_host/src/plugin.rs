//! # Plugin System Interface
//!
//! Defines the plugin lifecycle trait and error types.
//!
//! ## Plugin Lifecycle
//!
//! 1. **Creation** - Plugin instance created via `new()`
//! 2. **Handler Registration** - `register_handlers()` wires event handlers
//! 3. **Initialization** - `on_init()` with server context (config loading,
//!    permission registration, background tasks)
//! 4. **Operation** - Normal event processing
//! 5. **Shutdown** - `on_shutdown()` for cleanup

use crate::context::ServerContext;
use crate::system::EventSystem;
use async_trait::async_trait;
use std::sync::Arc;

/// High-level plugin trait.
///
/// Plugins in this workspace are linked statically and registered with the
/// host at startup; there is no dynamic-library loading phase.
#[async_trait]
pub trait SimplePlugin: Send + Sync + 'static {
    /// Returns the name of this plugin.
    ///
    /// The name should be unique and stable across versions. It's used for
    /// event routing, logging, and permission prefixes.
    fn name(&self) -> &str;

    /// Returns the version string of this plugin.
    ///
    /// Should follow semantic versioning (e.g. "1.2.3"); the configuration
    /// layer compares it against persisted config versions.
    fn version(&self) -> &str;

    /// Registers event handlers during pre-initialization.
    ///
    /// Called before `on_init()`. The plugin receives no events until this
    /// completes successfully.
    async fn register_handlers(
        &mut self,
        events: Arc<EventSystem>,
        context: Arc<dyn ServerContext>,
    ) -> Result<(), PluginError>;

    /// Initialize the plugin with server context.
    ///
    /// Use this for loading configuration, registering permissions, and
    /// setting up timers or background tasks.
    async fn on_init(&mut self, _context: Arc<dyn ServerContext>) -> Result<(), PluginError> {
        Ok(()) // Default implementation does nothing
    }

    /// Shutdown the plugin gracefully.
    ///
    /// Shutdown errors are logged but don't prevent unloading.
    async fn on_shutdown(&mut self, _context: Arc<dyn ServerContext>) -> Result<(), PluginError> {
        Ok(()) // Default implementation does nothing
    }
}

/// Errors that can occur during plugin lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Plugin initialization failed during startup
    #[error("Plugin initialization failed: {0}")]
    InitializationFailed(String),
    /// Error occurred during plugin execution
    #[error("Plugin execution error: {0}")]
    ExecutionError(String),
    /// Runtime error such as panic or system failure
    #[error("Plugin runtime error: {0}")]
    Runtime(String),
}
