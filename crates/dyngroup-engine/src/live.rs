//! Disposable projections of a node's live UI surface
//!
//! A `LiveNode` is what the host renders: ordered inputs, widgets and
//! outputs. It is recomputed from the durable `NodeConfigState` on every
//! rebuild and holds no state of its own worth preserving, except the
//! editor handles that must be released before a widget is discarded.

use serde_json::Value;

use dyngroup_model::{LinkId, WidgetKind};

use crate::host::EditorHandle;

/// A live input port.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveInput {
    pub name: String,
    /// Upper-cased type tag; `*` is the wildcard
    pub ty: String,
    /// Display-label override, if the user renamed the port
    pub label: Option<String>,
    /// The attached link, if connected
    pub link: Option<LinkId>,
    /// Set when this input was promoted from a widget
    pub from_widget: bool,
}

/// A live output port.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveOutput {
    pub name: String,
    pub ty: String,
    pub label: Option<String>,
}

/// A live widget with its materialized value.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveWidget {
    pub name: String,
    pub kind: WidgetKind,
    pub value: Value,
    /// Backing editor element for multi-line text widgets
    pub editor: Option<EditorHandle>,
}

/// The live UI surface of one node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveNode {
    pub inputs: Vec<LiveInput>,
    pub widgets: Vec<LiveWidget>,
    pub outputs: Vec<LiveOutput>,
    /// Canvas size, preserved across rebuilds
    pub size: (f64, f64),
}

impl LiveNode {
    /// Create an empty projection
    pub fn new() -> Self {
        Self::default()
    }

    /// Find an input by name
    pub fn input(&self, name: &str) -> Option<&LiveInput> {
        self.inputs.iter().find(|i| i.name == name)
    }

    /// Find a widget by name
    pub fn widget(&self, name: &str) -> Option<&LiveWidget> {
        self.widgets.iter().find(|w| w.name == name)
    }

    /// Find an output by name
    pub fn output(&self, name: &str) -> Option<&LiveOutput> {
        self.outputs.iter().find(|o| o.name == name)
    }
}
