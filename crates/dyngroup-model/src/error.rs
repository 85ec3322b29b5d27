//! Error types for the data model

use thiserror::Error;

/// Result type alias using SpecError
pub type Result<T> = std::result::Result<T, SpecError>;

/// Errors that can occur while reading declarative specs
#[derive(Debug, Error)]
pub enum SpecError {
    /// The widget declaration JSON could not be parsed
    #[error("Widget configuration parse error: {0}")]
    WidgetConfig(#[from] serde_json::Error),
}
