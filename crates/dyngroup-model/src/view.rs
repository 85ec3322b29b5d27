//! Read-only graph snapshots consumed by the serializer
//!
//! A `NodeView` is a per-node snapshot handed over by the host when the
//! user serializes a selection. Link ids are opaque identifiers correlating
//! an input's consumed link to the output slot that produced it, scoped to
//! the serialized selection.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque identifier of a link in the host graph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LinkId(pub u64);

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only snapshot of one selected node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeView {
    /// Display title, emitted as a traceability comment
    pub title: String,
    /// Node type identifier; `None` when the host could not resolve it
    #[serde(rename = "type")]
    pub type_id: Option<String>,
    #[serde(default)]
    pub inputs: Vec<InputView>,
    #[serde(default)]
    pub widgets: Vec<WidgetView>,
    #[serde(default)]
    pub outputs: Vec<OutputView>,
}

/// Snapshot of one input slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputView {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub ty: String,
    /// The link feeding this input, if connected within the selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkId>,
}

/// Snapshot of one widget and its current value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetView {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub value: Value,
}

/// Snapshot of one output slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputView {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub ty: String,
    /// Links this output feeds, in host order
    #[serde(default)]
    pub links: Vec<LinkId>,
}

impl NodeView {
    /// Create an empty node snapshot
    pub fn new(title: impl Into<String>, type_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            type_id: Some(type_id.into()),
            inputs: Vec::new(),
            widgets: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Add an input slot
    pub fn with_input(
        mut self,
        name: impl Into<String>,
        ty: impl Into<String>,
        link: Option<LinkId>,
    ) -> Self {
        self.inputs.push(InputView {
            name: name.into(),
            label: None,
            ty: ty.into(),
            link,
        });
        self
    }

    /// Add a widget with its current value
    pub fn with_widget(
        mut self,
        name: impl Into<String>,
        ty: impl Into<String>,
        value: Value,
    ) -> Self {
        self.widgets.push(WidgetView {
            name: name.into(),
            ty: ty.into(),
            value,
        });
        self
    }

    /// Add an output slot with the links it feeds
    pub fn with_output(
        mut self,
        name: impl Into<String>,
        ty: impl Into<String>,
        links: Vec<LinkId>,
    ) -> Self {
        self.outputs.push(OutputView {
            name: name.into(),
            label: None,
            ty: ty.into(),
            links,
        });
        self
    }
}
