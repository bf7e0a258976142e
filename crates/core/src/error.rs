#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} ({key})")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Slot capacity exceeded for {kind} reservations")]
    CapacityExceeded { kind: &'static str },

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Not-found constructor for entities keyed by a numeric id.
    pub fn not_found(entity: &'static str, id: crate::types::DbId) -> Self {
        CoreError::NotFound {
            entity,
            key: id.to_string(),
        }
    }
}
