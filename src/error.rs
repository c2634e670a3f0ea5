use thiserror::Error;

/// Errors surfaced by the map view host
#[derive(Debug, Error)]
pub enum MapError {
    /// The map surface could not be mounted; the host never reached `Ready`
    #[error("failed to initialize map on '{target}': {reason}")]
    InitializationFailure { target: String, reason: String },

    #[error("map view is already initialized")]
    AlreadyInitialized,

    #[error("map view has been disposed")]
    Disposed,
}

/// Errors raised while reading coordinates out of a finished geometry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("malformed {kind} geometry: {reason}")]
    Malformed { kind: String, reason: String },
}

/// Errors reported by a map engine implementation
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no mount target named '{0}'")]
    NoMountTarget(String),

    #[error("mount failed: {0}")]
    MountFailed(String),
}

/// Errors that can occur while loading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
