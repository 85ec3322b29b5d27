//! Topological ordering of a selection
//!
//! Kahn's algorithm over the link-derived dependency graph: node A precedes
//! node B iff some output link of A feeds some input of B. Ties between
//! independent nodes resolve by selection order, so output is reproducible.

use std::collections::BTreeSet;

use log::warn;

use dyngroup_model::NodeView;

/// Order node indices so every producer appears before its consumers.
///
/// Data-flow edges in a valid host graph are acyclic; should a cycle occur
/// anyway, its participants are appended in selection order after a
/// diagnostic rather than failing the serialization.
pub fn topological_order(nodes: &[NodeView]) -> Vec<usize> {
    let n = nodes.len();
    let mut edges: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut in_degree = vec![0usize; n];

    for (producer, node) in nodes.iter().enumerate() {
        for output in &node.outputs {
            for link in &output.links {
                for (consumer, target) in nodes.iter().enumerate() {
                    if target.inputs.iter().any(|input| input.link == Some(*link)) {
                        edges[producer].push(consumer);
                        in_degree[consumer] += 1;
                    }
                }
            }
        }
    }

    // Ready set keyed by index: popping the minimum gives selection order.
    let mut ready: BTreeSet<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(&index) = ready.iter().next() {
        ready.remove(&index);
        order.push(index);
        for &consumer in &edges[index] {
            in_degree[consumer] -= 1;
            if in_degree[consumer] == 0 {
                ready.insert(consumer);
            }
        }
    }

    if order.len() < n {
        warn!(
            "cycle detected among {} node(s), emitting them in selection order",
            n - order.len()
        );
        let placed: BTreeSet<usize> = order.iter().copied().collect();
        order.extend((0..n).filter(|i| !placed.contains(i)));
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyngroup_model::LinkId;

    fn chain() -> Vec<NodeView> {
        // c <- b <- a, deliberately listed in reverse.
        vec![
            NodeView::new("C", "Sink").with_input("x", "*", Some(LinkId(2))),
            NodeView::new("B", "Middle")
                .with_input("x", "*", Some(LinkId(1)))
                .with_output("y", "*", vec![LinkId(2)]),
            NodeView::new("A", "Source").with_output("y", "*", vec![LinkId(1)]),
        ]
    }

    #[test]
    fn test_producers_precede_consumers() {
        let order = topological_order(&chain());
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn test_independent_nodes_keep_selection_order() {
        let nodes = vec![
            NodeView::new("B", "Load"),
            NodeView::new("A", "Load"),
            NodeView::new("C", "Load"),
        ];
        assert_eq!(topological_order(&nodes), vec![0, 1, 2]);
    }

    #[test]
    fn test_cycle_is_not_fatal() {
        let nodes = vec![
            NodeView::new("A", "T")
                .with_input("x", "*", Some(LinkId(2)))
                .with_output("y", "*", vec![LinkId(1)]),
            NodeView::new("B", "T")
                .with_input("x", "*", Some(LinkId(1)))
                .with_output("y", "*", vec![LinkId(2)]),
            NodeView::new("C", "T"),
        ];
        let order = topological_order(&nodes);
        assert_eq!(order.len(), 3);
        assert_eq!(order[0], 2); // the acyclic node still sorts first
        assert_eq!(&order[1..], &[0, 1]); // cycle members in selection order
    }

    #[test]
    fn test_diamond_is_deterministic() {
        //   a -> b, a -> c, b -> d, c -> d
        let nodes = vec![
            NodeView::new("A", "T").with_output("y", "*", vec![LinkId(1), LinkId(2)]),
            NodeView::new("B", "T")
                .with_input("x", "*", Some(LinkId(1)))
                .with_output("y", "*", vec![LinkId(3)]),
            NodeView::new("C", "T")
                .with_input("x", "*", Some(LinkId(2)))
                .with_output("y", "*", vec![LinkId(4)]),
            NodeView::new("D", "T")
                .with_input("l", "*", Some(LinkId(3)))
                .with_input("r", "*", Some(LinkId(4))),
        ];
        assert_eq!(topological_order(&nodes), vec![0, 1, 2, 3]);
    }
}
