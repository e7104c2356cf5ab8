use thiserror::Error;

/// Top-level error type for the vaultplan floor-plan core.
#[derive(Debug, Error)]
pub enum VaultplanError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

impl VaultplanError {
    /// Message suitable for showing to the person editing the map.
    ///
    /// Invalid shapes keep their specific message; kernel failures get a
    /// generic one.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Geometry(GeometryError::InvalidShape(msg)) => format!("Invalid shape: {msg}"),
            Self::Geometry(GeometryError::Kernel(_)) => {
                "The shape could not be combined with the dungeon.".to_owned()
            }
            other => other.to_string(),
        }
    }
}

/// Errors raised by the geometry adapter.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("geometry kernel failure: {0}")]
    Kernel(String),

    #[error("malformed WKT: {0}")]
    Wkt(String),
}

/// Errors raised while reading or writing a dungeon state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("malformed dungeon document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by editing operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors reported by external collaborators.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("persistence failed: {0}")]
    Persistence(String),

    #[error("wall store failed: {0}")]
    WallStore(String),
}

/// Convenience type alias for results using [`VaultplanError`].
pub type Result<T> = std::result::Result<T, VaultplanError>;
