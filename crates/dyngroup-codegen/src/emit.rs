//! Program emission
//!
//! For each node in topological order, emit a traceability comment, one
//! `graph.node(...)` call expression binding every input and widget, and
//! one accessor binding per output. Inputs fed from within the selection
//! reference the producer's generated variable; everything else gets a
//! placeholder token carrying the declared type.

use std::collections::{HashMap, HashSet};

use log::warn;
use serde_json::Value;

use dyngroup_model::{LinkId, NodeView};

use crate::elide::elide_passthroughs;
use crate::names::NameAllocator;
use crate::order::topological_order;

/// Marker line opening every generated program.
pub const CODE_HEADER: &str = "# AUTO-GENERATED CODE";

/// Behavior knobs for one serialization run.
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Node types elided as pass-through routing
    pub passthrough_types: HashSet<String>,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            passthrough_types: std::iter::once("Reroute".to_string()).collect(),
        }
    }
}

/// Serialize a selection into an equivalent flat program.
///
/// Nodes with no resolvable type are skipped with a diagnostic; partial
/// output is preferable to none.
pub fn serialize(selection: &[NodeView], opts: &SerializeOptions) -> String {
    let nodes = elide_passthroughs(selection, &opts.passthrough_types);
    let order = topological_order(&nodes);

    let mut names = NameAllocator::new();
    let mut link_vars: HashMap<LinkId, String> = HashMap::new();
    let mut blocks: Vec<String> = vec![CODE_HEADER.to_string()];

    for index in order {
        let node = &nodes[index];
        let Some(type_id) = node.type_id.as_deref().filter(|t| !t.is_empty()) else {
            warn!("skipping node '{}': no resolvable type", node.title);
            continue;
        };

        let node_var = names.allocate(type_id);
        let mut args: Vec<String> = Vec::new();
        for input in &node.inputs {
            let bound = input
                .link
                .and_then(|link| link_vars.get(&link).cloned())
                .unwrap_or_else(|| format!("TYPE_{}", input.ty));
            args.push(format!("{}={}", input.name, bound));
        }
        for widget in &node.widgets {
            args.push(format!("{}={}", widget.name, format_literal(&widget.value)));
        }

        let mut lines = vec![format!("# {}", node.title)];
        if args.is_empty() {
            lines.push(format!("{node_var} = graph.node('{type_id}')"));
        } else {
            lines.push(format!(
                "{node_var} = graph.node('{type_id}', {})",
                args.join(", ")
            ));
        }

        for (slot, output) in node.outputs.iter().enumerate() {
            let out_var = names.allocate(&format!("{node_var}_out{slot}"));
            lines.push(format!("{out_var} = {node_var}.out({slot})"));
            for link in &output.links {
                link_vars.insert(*link, out_var.clone());
            }
        }

        blocks.push(lines.join("\n"));
    }

    blocks.join("\n\n")
}

/// Render a stored widget value as a program literal.
///
/// Strings are quoted with `"` escaped, booleans become `True`/`False`,
/// arrays are bracketed element-wise, numbers stay bare.
fn format_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(format_literal).collect();
            format!("[{}]", rendered.join(", "))
        }
        // Objects do not occur in widget values; fall back to their JSON.
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_chain() -> Vec<NodeView> {
        vec![
            NodeView::new("Load Prompt", "LoadPrompt")
                .with_widget("text", "STRING", Value::from("hello"))
                .with_output("prompt", "STRING", vec![LinkId(1)]),
            NodeView::new("Encode", "TextEncode")
                .with_input("prompt", "STRING", Some(LinkId(1)))
                .with_output("embedding", "EMBEDDING", vec![LinkId(2)]),
            NodeView::new("Sample", "Sampler")
                .with_input("conditioning", "EMBEDDING", Some(LinkId(2)))
                .with_input("latent", "LATENT", None)
                .with_output("image", "IMAGE", vec![]),
        ]
    }

    #[test]
    fn test_linear_chain_references_upstream_vars() {
        let code = serialize(&linear_chain(), &SerializeOptions::default());

        assert!(code.starts_with(CODE_HEADER));
        let load = code.find("loadprompt = graph.node('LoadPrompt'").unwrap();
        let encode = code.find("textencode = graph.node('TextEncode'").unwrap();
        let sample = code.find("sampler = graph.node('Sampler'").unwrap();
        assert!(load < encode && encode < sample);

        // The consumer references the producer's generated variable.
        assert!(code.contains("prompt=loadprompt_out0"));
        assert!(code.contains("conditioning=textencode_out0"));
        // The unlinked input gets a typed placeholder.
        assert!(code.contains("latent=TYPE_LATENT"));
        // Accessors are indexed by output position.
        assert!(code.contains("loadprompt_out0 = loadprompt.out(0)"));
    }

    #[test]
    fn test_title_comments_and_block_separation() {
        let code = serialize(&linear_chain(), &SerializeOptions::default());
        assert!(code.contains("# Load Prompt\n"));
        assert!(code.contains("\n\n# Encode\n"));
    }

    #[test]
    fn test_widget_literals() {
        let node = NodeView::new("N", "Configurable")
            .with_widget("name", "STRING", Value::from("say \"hi\""))
            .with_widget("active", "BOOLEAN", Value::from(true))
            .with_widget("count", "INT", Value::from(3))
            .with_widget("scale", "FLOAT", Value::from(0.5))
            .with_widget("tags", "COMBO", serde_json::json!(["a", "b"]));

        let code = serialize(std::slice::from_ref(&node), &SerializeOptions::default());
        assert!(code.contains(r#"name="say \"hi\"""#));
        assert!(code.contains("active=True"));
        assert!(code.contains("count=3"));
        assert!(code.contains("scale=0.5"));
        assert!(code.contains(r#"tags=["a", "b"]"#));
    }

    #[test]
    fn test_passthrough_transparency() {
        let direct = vec![
            NodeView::new("Source", "LoadValue").with_output("value", "INT", vec![LinkId(1)]),
            NodeView::new("Sink", "Print").with_input("value", "INT", Some(LinkId(1))),
        ];
        let via_reroutes = vec![
            NodeView::new("Source", "LoadValue").with_output("value", "INT", vec![LinkId(1)]),
            NodeView::new("Reroute", "Reroute")
                .with_input("", "*", Some(LinkId(1)))
                .with_output("", "*", vec![LinkId(2)]),
            NodeView::new("Reroute", "Reroute")
                .with_input("", "*", Some(LinkId(2)))
                .with_output("", "*", vec![LinkId(3)]),
            NodeView::new("Sink", "Print").with_input("value", "INT", Some(LinkId(3))),
        ];

        let opts = SerializeOptions::default();
        assert_eq!(serialize(&direct, &opts), serialize(&via_reroutes, &opts));
    }

    #[test]
    fn test_emitted_identifiers_are_unique() {
        // Three nodes of the same type, each with an output.
        let nodes: Vec<NodeView> = (0..3)
            .map(|i| {
                NodeView::new("Load", "LoadValue").with_output(
                    "value",
                    "INT",
                    vec![LinkId(100 + i)],
                )
            })
            .collect();

        let code = serialize(&nodes, &SerializeOptions::default());
        let mut seen = std::collections::HashSet::new();
        for line in code.lines() {
            if let Some((name, _)) = line.split_once(" = ") {
                assert!(seen.insert(name.to_string()), "duplicate identifier {name}");
            }
        }
        assert!(seen.contains("loadvalue"));
        assert!(seen.contains("loadvalue_1"));
        assert!(seen.contains("loadvalue_2"));
    }

    #[test]
    fn test_unresolvable_type_is_skipped() {
        let mut unknown = NodeView::new("Mystery", "X");
        unknown.type_id = None;
        let nodes = vec![
            unknown,
            NodeView::new("Load", "LoadValue").with_output("value", "INT", vec![]),
        ];

        let code = serialize(&nodes, &SerializeOptions::default());
        assert!(!code.contains("Mystery"));
        assert!(code.contains("loadvalue = graph.node('LoadValue')"));
    }

    #[test]
    fn test_deterministic_output() {
        let nodes = linear_chain();
        let opts = SerializeOptions::default();
        assert_eq!(serialize(&nodes, &opts), serialize(&nodes, &opts));
    }

    #[test]
    fn test_empty_selection_is_header_only() {
        assert_eq!(
            serialize(&[], &SerializeOptions::default()),
            CODE_HEADER.to_string()
        );
    }
}
