//! Error types for the host event system.

/// Errors that can occur while registering for or dispatching events.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// Event payload could not be serialized for dispatch
    #[error("Event serialization failed: {0}")]
    Serialization(String),

    /// Event payload could not be deserialized into the handler's type
    #[error("Event deserialization failed: {0}")]
    Deserialization(String),

    /// Handler reported a failure while processing an event
    #[error("Handler execution failed: {0}")]
    HandlerExecutionFailed(String),

    /// Event payload did not match the type the handler expects
    #[error("Invalid event format: {0}")]
    InvalidEventFormat(String),
}
