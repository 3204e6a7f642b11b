//! Error types shared across the crate.

/// A bounded registry refused an append.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry already holds `capacity` entries.
    #[error("registry is full (capacity {capacity})")]
    Full { capacity: usize },
}

/// Failure reported by a [`RenderBackend`](crate::frame::RenderBackend).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// More instances than the backend's instance buffer can hold.
    #[error("instance buffer overflow: {requested} instances, capacity {capacity}")]
    InstanceCapacity { requested: usize, capacity: usize },

    /// `draw` was called before the per-frame uploads.
    #[error("draw issued before {0} was uploaded")]
    MissingUpload(&'static str),

    /// Device-level failure of an external backend.
    #[error("backend failure: {0}")]
    Device(String),
}

/// Errors produced while assembling or submitting a frame.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    /// More lights than the constant buffer has slots for.
    #[error("{count} lights do not fit the {max} light slots")]
    TooManyLights { count: usize, max: usize },
}
