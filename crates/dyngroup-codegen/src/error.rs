//! Error types for the serializer

use thiserror::Error;

/// Result type alias using CodegenError
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors the host can report back during group-node creation
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The host refused to insert the generated node
    #[error("Node insertion failed: {0}")]
    NodeInsertion(String),

    /// The clipboard write failed
    #[error("Clipboard write failed: {0}")]
    Clipboard(String),
}
