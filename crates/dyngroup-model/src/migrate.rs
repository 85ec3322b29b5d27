//! One-time migration of older persisted property shapes
//!
//! Saved workflows from earlier plugin revisions disagree on two points:
//! durable state sometimes lives under a nested `data` object instead of at
//! the top level, and `widgets_as_inputs` was persisted in three
//! incompatible shapes (array of names, array of `[name, linkId]` pairs,
//! object keyed by name). Loading canonicalizes everything; nothing else in
//! the codebase reads the legacy shapes.

use std::collections::BTreeMap;

use log::warn;
use serde_json::Value;

use crate::config::{NodeConfigState, PortLabels};
use crate::view::LinkId;

/// Load a node configuration from a host property bag, migrating legacy
/// shapes where found.
///
/// Unreadable fields degrade to their defaults with a diagnostic; loading
/// never fails outright.
pub fn load_config(props: &Value) -> NodeConfigState {
    let text = |key: &str| -> String {
        props
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    // Durable state lived under `data` in some revisions.
    let durable = props.get("data").unwrap_or(props);

    let mut config = NodeConfigState {
        inputs: text("inputs"),
        outputs: text("outputs"),
        widgets: text("widgets"),
        pycode: text("pycode"),
        widgets_values: load_values(durable.get("widgets_values").or_else(|| props.get("widgets_values"))),
        links: load_links(durable.get("links")),
        labels: load_labels(durable.get("labels")),
        widgets_as_inputs: Vec::new(),
    };
    config.widgets_as_inputs =
        migrate_widgets_as_inputs(durable.get("widgets_as_inputs"), &mut config.links);
    config
}

fn load_values(raw: Option<&Value>) -> BTreeMap<String, Value> {
    match raw {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        Some(other) => {
            warn!("widgets_values has unexpected shape {other}, ignoring");
            BTreeMap::new()
        }
        None => BTreeMap::new(),
    }
}

fn load_links(raw: Option<&Value>) -> Vec<(String, LinkId)> {
    let Some(Value::Array(entries)) = raw else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| match pair(entry) {
            Some(pair) => Some(pair),
            None => {
                warn!("skipping malformed links entry {entry}");
                None
            }
        })
        .collect()
}

fn load_labels(raw: Option<&Value>) -> PortLabels {
    match raw {
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|err| {
            warn!("labels have unexpected shape ({err}), ignoring");
            PortLabels::default()
        }),
        None => PortLabels::default(),
    }
}

/// Canonicalize `widgets_as_inputs` to an ordered list of widget names.
///
/// The pair-array shape carried a link id per promoted widget; those ids
/// are folded into `links` when the port has no entry yet, so the ordinary
/// link table remains the single source of link state.
pub fn migrate_widgets_as_inputs(
    raw: Option<&Value>,
    links: &mut Vec<(String, LinkId)>,
) -> Vec<String> {
    match raw {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(name) => Some(name.clone()),
                Value::Array(_) => {
                    let (name, link) = pair(entry)?;
                    if !links.iter().any(|(n, _)| *n == name) {
                        links.push((name.clone(), link));
                    }
                    Some(name)
                }
                other => {
                    warn!("skipping malformed widgets_as_inputs entry {other}");
                    None
                }
            })
            .collect(),
        Some(Value::Object(map)) => map.keys().cloned().collect(),
        Some(other) => {
            warn!("widgets_as_inputs has unexpected shape {other}, ignoring");
            Vec::new()
        }
    }
}

/// Read a `[name, linkId]` pair
fn pair(entry: &Value) -> Option<(String, LinkId)> {
    let items = entry.as_array()?;
    if items.len() != 2 {
        return None;
    }
    let name = items[0].as_str()?.to_string();
    let link = LinkId(items[1].as_u64()?);
    Some((name, link))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_top_level_shape() {
        let config = load_config(&json!({
            "inputs": "var1: STRING",
            "outputs": "out1",
            "widgets": "[]",
            "pycode": "out1=var1",
            "widgets_values": {"MyAge": 31},
            "data": {
                "links": [["var1", 4]],
                "labels": {"inputs": {"var1": "Variable 1"}}
            }
        }));
        assert_eq!(config.inputs, "var1: STRING");
        assert_eq!(config.widgets_values["MyAge"], json!(31));
        assert_eq!(config.link_for("var1"), Some(LinkId(4)));
        assert_eq!(
            config.labels.inputs.get("var1").map(String::as_str),
            Some("Variable 1")
        );
    }

    #[test]
    fn test_migrate_name_array() {
        let mut links = Vec::new();
        let names = migrate_widgets_as_inputs(Some(&json!(["MyAge", "Name"])), &mut links);
        assert_eq!(names, vec!["MyAge", "Name"]);
        assert!(links.is_empty());
    }

    #[test]
    fn test_migrate_pair_array_folds_links() {
        let mut links = vec![("MyAge".to_string(), LinkId(1))];
        let names = migrate_widgets_as_inputs(
            Some(&json!([["MyAge", 5], ["Name", 6]])),
            &mut links,
        );
        assert_eq!(names, vec!["MyAge", "Name"]);
        // Existing entry wins; missing entry is folded in.
        assert_eq!(links, vec![
            ("MyAge".to_string(), LinkId(1)),
            ("Name".to_string(), LinkId(6)),
        ]);
    }

    #[test]
    fn test_migrate_object_shape() {
        let mut links = Vec::new();
        let names =
            migrate_widgets_as_inputs(Some(&json!({"MyAge": true, "Name": true})), &mut links);
        assert_eq!(names, vec!["MyAge", "Name"]);
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let mut links = Vec::new();
        let names = migrate_widgets_as_inputs(
            Some(&json!([42, "MyAge", ["bad"]])),
            &mut links,
        );
        assert_eq!(names, vec!["MyAge"]);
    }

    #[test]
    fn test_load_empty_bag() {
        let config = load_config(&json!({}));
        assert_eq!(config, NodeConfigState::default());
    }
}
