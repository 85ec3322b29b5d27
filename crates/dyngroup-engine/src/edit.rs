//! Committing configuration-dialog edits
//!
//! The dialog collects edited spec strings and hands them over as one
//! `SpecEdit`. The edit is validated as a whole before anything is applied:
//! on failure the config is left byte-for-byte unchanged and the errors go
//! back to the host for its blocking modal. On success the spec strings are
//! overwritten, durable state is preserved (unless explicitly cleared), and
//! the node is rebuilt.

use dyngroup_model::validation::{validate_ports, validate_widgets};
use dyngroup_model::widgets::try_parse_widget_spec;
use dyngroup_model::{Collection, NodeConfigState, ValidationError};

use crate::error::{EngineError, Result};
use crate::host::HostServices;
use crate::live::LiveNode;
use crate::rebuild::rebuild;

/// A pending edit from the configuration dialog.
///
/// `None` fields are left untouched, matching a dialog tab the user never
/// opened.
#[derive(Debug, Clone, Default)]
pub struct SpecEdit {
    pub inputs: Option<String>,
    pub outputs: Option<String>,
    pub widgets: Option<String>,
    pub pycode: Option<String>,
    /// Also drop stored widget values, re-materializing declared defaults
    pub clear_values: bool,
}

/// Validate and apply a dialog edit, then rebuild the node.
///
/// Rejection is all-or-nothing: a single invalid name anywhere leaves the
/// whole config unchanged.
pub fn commit_edit(
    config: &mut NodeConfigState,
    node: &mut LiveNode,
    host: &mut dyn HostServices,
    edit: SpecEdit,
) -> Result<()> {
    let mut errors: Vec<ValidationError> = Vec::new();

    if let Some(text) = &edit.inputs {
        errors.extend(validate_ports(Collection::Inputs, text));
    }
    if let Some(text) = &edit.outputs {
        errors.extend(validate_ports(Collection::Outputs, text));
    }
    if let Some(text) = &edit.widgets {
        // Malformed JSON is rejected here, unlike on load where it degrades.
        let widgets = try_parse_widget_spec(text).map_err(EngineError::EditUnparseable)?;
        errors.extend(validate_widgets(&widgets));
    }

    if !errors.is_empty() {
        return Err(EngineError::EditRejected(errors));
    }

    if let Some(text) = edit.inputs {
        config.inputs = text.trim().to_string();
    }
    if let Some(text) = edit.outputs {
        config.outputs = text.trim().to_string();
    }
    if let Some(text) = edit.widgets {
        config.widgets = text;
    }
    if let Some(text) = edit.pycode {
        config.pycode = text;
    }
    if edit.clear_values {
        config.widgets_values.clear();
    }

    rebuild(config, node, host);
    Ok(())
}
