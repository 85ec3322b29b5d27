//! Pass-through elision
//!
//! A pass-through node (a reroute) has one input and one output and
//! forwards its value unchanged. Before emission the selection is rewritten
//! so every consumer that read a pass-through's output reads the ultimate
//! upstream source instead, and the pass-through nodes disappear. Chains of
//! pass-throughs resolve transitively.
//!
//! The rewrite works over an arena of immutable snapshots keyed by link
//! ids; nothing mutates the host graph.

use std::collections::{HashMap, HashSet};

use log::warn;

use dyngroup_model::{LinkId, NodeView};

/// Whether a node is an elidable pass-through.
fn is_passthrough(node: &NodeView, passthrough_types: &HashSet<String>) -> bool {
    node.type_id
        .as_deref()
        .is_some_and(|t| passthrough_types.contains(t))
        && node.inputs.len() == 1
        && node.outputs.len() == 1
}

/// Remove pass-through nodes from a selection.
///
/// Surviving nodes are returned in selection order with their input links
/// rewritten to the resolved upstream source. An input fed by a
/// pass-through whose own input was unlinked becomes unlinked.
pub fn elide_passthroughs(
    selection: &[NodeView],
    passthrough_types: &HashSet<String>,
) -> Vec<NodeView> {
    // Map each link a pass-through produces to the link feeding it.
    let mut upstream: HashMap<LinkId, Option<LinkId>> = HashMap::new();
    for node in selection {
        if !is_passthrough(node, passthrough_types) {
            continue;
        }
        let fed_by = node.inputs[0].link;
        for link in &node.outputs[0].links {
            upstream.insert(*link, fed_by);
        }
    }

    // Follow chains until a link no pass-through produced. The hop guard
    // only trips on a pass-through cycle, which a valid graph never has.
    let resolve = |start: LinkId| -> Option<LinkId> {
        let mut link = start;
        let mut hops = 0;
        loop {
            match upstream.get(&link) {
                Some(Some(next)) => {
                    link = *next;
                    hops += 1;
                    if hops > upstream.len() {
                        warn!("pass-through cycle while resolving link {start}");
                        return None;
                    }
                }
                Some(None) => return None,
                None => return Some(link),
            }
        }
    };

    selection
        .iter()
        .filter(|node| !is_passthrough(node, passthrough_types))
        .map(|node| {
            let mut node = node.clone();
            for input in &mut node.inputs {
                input.link = input.link.and_then(resolve);
            }
            node
        })
        .collect()
}
