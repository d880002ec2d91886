//! Error types for Kiln

use thiserror::Error;

/// Errors surfaced by Kiln operations
///
/// Every failure is reported synchronously to the immediate caller. Nothing
/// is retried: configuration mistakes fail fast and resource failures are
/// left to the host to degrade around.
#[derive(Error, Debug)]
pub enum KilnError {
    /// A producer was asked for a texture before its dimensions were usable
    #[error("producer is not ready: {0}")]
    NotReady(String),

    /// The requested configuration can never succeed (e.g. radial gradients)
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    /// The engine refused to allocate a surface, path, shader or font
    #[error("resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// Something required to fulfil the request is absent
    #[error("missing dependency: {0}")]
    MissingDependency(String),

    /// A host-canvas-backed surface was requested without a canvas handle
    #[error("a host canvas is required for canvas-backed surfaces")]
    CanvasRequired,

    /// The fingerprint input could not be encoded
    #[error("failed to encode fingerprint input: {0}")]
    Fingerprint(#[from] serde_json::Error),

    /// Configuration text could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for Kiln operations
pub type Result<T> = std::result::Result<T, KilnError>;
