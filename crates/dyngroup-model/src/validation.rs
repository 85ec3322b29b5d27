//! Identifier validation for dialog edits
//!
//! Port and widget names become variables in generated programs, so edits
//! are checked against identifier rules before they are committed. All
//! errors are reported (not just the first) so the dialog can show a
//! complete list; the original spec is left unchanged on failure.

use crate::ports::parse_port_spec;
use crate::widgets::WidgetSpec;

/// Names and type tags longer than this are rejected.
pub const MAX_NAME_LEN: usize = 50;

/// Which declaration collection an error was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Inputs,
    Outputs,
    Widgets,
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inputs => write!(f, "inputs"),
            Self::Outputs => write!(f, "outputs"),
            Self::Widgets => write!(f, "widgets"),
        }
    }
}

/// Validation error with location context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A name fails the identifier rules
    InvalidName { collection: Collection, name: String },
    /// A type tag fails the type-tag rules
    InvalidType { collection: Collection, ty: String },
    /// Two entries in one collection share a name
    DuplicateName { collection: Collection, name: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName { collection, name } => {
                write!(f, "Invalid {collection} name '{name}'")
            }
            Self::InvalidType { collection, ty } => {
                write!(f, "Invalid {collection} type '{ty}'")
            }
            Self::DuplicateName { collection, name } => {
                write!(f, "Duplicate {collection} name '{name}'")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Whether `name` is a legal port/widget name: a letter or underscore
/// followed by word characters, at most [`MAX_NAME_LEN`] long.
pub fn is_valid_identifier(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Whether `ty` is a legal type tag: the wildcard, or an identifier.
pub fn is_valid_type_tag(ty: &str) -> bool {
    ty == crate::ports::WILDCARD_TYPE || is_valid_identifier(ty)
}

/// Validate an edited port spec string.
///
/// Returns all errors found. Blank lines are not errors (the parser skips
/// them), so a spec that parses to nothing validates clean.
pub fn validate_ports(collection: Collection, spec: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for port in parse_port_spec(spec) {
        if !is_valid_identifier(&port.name) {
            errors.push(ValidationError::InvalidName {
                collection,
                name: port.name.clone(),
            });
        }
        if !is_valid_type_tag(&port.ty) {
            errors.push(ValidationError::InvalidType {
                collection,
                ty: port.ty.clone(),
            });
        }
        if !seen.insert(port.name.clone()) {
            errors.push(ValidationError::DuplicateName {
                collection,
                name: port.name,
            });
        }
    }

    errors
}

/// Validate an edited widget list (already parsed).
pub fn validate_widgets(widgets: &[WidgetSpec]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for widget in widgets {
        if !is_valid_identifier(&widget.name) {
            errors.push(ValidationError::InvalidName {
                collection: Collection::Widgets,
                name: widget.name.clone(),
            });
        }
        if !seen.insert(widget.name.clone()) {
            errors.push(ValidationError::DuplicateName {
                collection: Collection::Widgets,
                name: widget.name.clone(),
            });
        }
    }

    errors
}
