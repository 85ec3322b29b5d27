//! Persisted per-node configuration
//!
//! `NodeConfigState` is the durable property bag of a dynamic group node.
//! The spec strings (`inputs`, `outputs`, `widgets`) describe what to
//! build; `widgets_values`, `links`, `widgets_as_inputs` and `labels` are
//! the durable state that must survive a full rebuild. Live ports and
//! widgets are disposable projections recomputed from spec plus durable
//! state on every rebuild.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::view::LinkId;

/// Display-label overrides, keyed by port/widget name.
///
/// Labels are durable state: renaming a port's display label in the host
/// survives the destroy-and-rebuild cycle triggered by spec edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortLabels {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub widgets: BTreeMap<String, String>,
}

/// The durable configuration of one dynamic group node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeConfigState {
    /// Input declarations, one `name[: TYPE]` per line
    #[serde(default)]
    pub inputs: String,
    /// Output declarations, same line format as inputs
    #[serde(default)]
    pub outputs: String,
    /// Widget declarations, JSON array (legacy line format accepted on load)
    #[serde(default)]
    pub widgets: String,
    /// Current widget values, keyed by widget name
    #[serde(default)]
    pub widgets_values: BTreeMap<String, Value>,
    /// Restorable input links as `[portName, linkId]` pairs
    #[serde(default)]
    pub links: Vec<(String, LinkId)>,
    /// Names of widgets promoted to connectable inputs
    #[serde(default)]
    pub widgets_as_inputs: Vec<String>,
    /// Display-label overrides
    #[serde(default)]
    pub labels: PortLabels,
    /// Opaque program payload; never interpreted here
    #[serde(default)]
    pub pycode: String,
}

impl NodeConfigState {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// The demonstration configuration a freshly placed node receives when
    /// it has no prior `inputs` property.
    pub fn starter() -> Self {
        Self {
            inputs: "var1: STRING\nvar2: INT".to_string(),
            outputs: "out1: STRING\nout2: INT\nmy_age: INT\nweight: FLOAT\nname: STRING\nactive: BOOLEAN\ngender: STRING"
                .to_string(),
            widgets: concat!(
                "[\n",
                r#"  {"type": "INT", "name": "MyAge", "value": "30", "min": "0", "max": "100", "step": "1"},"#, "\n",
                r#"  {"type": "FLOAT", "name": "Weight", "value": "75.5", "min": "50", "max": "150", "step": "0.5", "precision": "3"},"#, "\n",
                r#"  {"type": "STRING", "name": "Name", "value": "John"},"#, "\n",
                r#"  {"type": "MSTRING", "name": "Name2", "value": "John"},"#, "\n",
                r#"  {"type": "BOOLEAN", "name": "Active", "value": "true"},"#, "\n",
                r#"  {"type": "COMBO", "name": "Gender", "value": "male", "values": ["male", "female"]}"#, "\n",
                "]"
            )
            .to_string(),
            pycode: concat!(
                "out1=var1\n",
                "out2=var2\n",
                "my_age=MyAge\n",
                "weight=Weight\n",
                "name=Name\n",
                "active=Active\n",
                "gender=Gender\n",
                "result='some result'\n",
            )
            .to_string(),
            ..Self::default()
        }
    }

    /// Record an interactive widget change.
    ///
    /// Returns `true` when the stored value actually changed, so callers
    /// can skip persistence for no-op callbacks.
    pub fn record_widget_change(&mut self, name: &str, value: Value) -> bool {
        if self.widgets_values.get(name) == Some(&value) {
            return false;
        }
        self.widgets_values.insert(name.to_string(), value);
        true
    }

    /// Record a connection change notification from the host.
    ///
    /// A connect replaces any existing entry for the port (an input holds
    /// at most one link); a disconnect removes the matching pair only.
    pub fn record_connection(&mut self, port: &str, link: LinkId, connected: bool) {
        self.links.retain(|(name, id)| {
            if connected {
                name != port
            } else {
                !(name == port && *id == link)
            }
        });
        if connected {
            self.links.push((port.to_string(), link));
        }
    }

    /// The recorded link for a port, if any
    pub fn link_for(&self, port: &str) -> Option<LinkId> {
        self.links
            .iter()
            .find(|(name, _)| name == port)
            .map(|(_, id)| *id)
    }

    /// Whether a widget of this name was promoted to a connectable input
    pub fn is_promoted(&self, widget_name: &str) -> bool {
        self.widgets_as_inputs.iter().any(|n| n == widget_name)
    }
}
