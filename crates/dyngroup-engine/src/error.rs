//! Error types for the node builder

use thiserror::Error;

use dyngroup_model::ValidationError;

/// Result type alias using EngineError
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur in the node builder
#[derive(Debug, Error)]
pub enum EngineError {
    /// A dialog edit failed validation and was not applied
    #[error("Edit rejected with {} validation error(s)", .0.len())]
    EditRejected(Vec<ValidationError>),

    /// The edited widget declaration could not be parsed
    #[error("Edit rejected: {0}")]
    EditUnparseable(#[from] dyngroup_model::SpecError),
}

impl EngineError {
    /// The individual validation errors, for display in the host's modal
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::EditRejected(errors) => errors,
            Self::EditUnparseable(_) => &[],
        }
    }
}
