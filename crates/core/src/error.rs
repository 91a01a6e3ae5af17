//! Domain error taxonomy shared across the workspace.

/// Core domain error.
///
/// HTTP mapping lives in the API crate; this type only distinguishes the
/// categories the rest of the system cares about.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    ///
    /// Entity ids are strings because the portal mixes numeric user ids
    /// with string-keyed steps and completion keys.
    #[error("{entity} with id {id} not found")]
    NotFound {
        entity: &'static str,
        id: String,
    },

    /// A task could not be resolved to a completion key.
    ///
    /// Callers building the expected-key set skip such tasks; the error
    /// only surfaces when a single task is the direct subject of a call.
    #[error("task '{0}' has no derivable completion key")]
    MissingKey(String),

    /// Input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request conflicts with current state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`] with any displayable id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
