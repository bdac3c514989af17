//! Human-readable inspection of a computation graph.
//!
//! Nodes are grouped by their distance from the root (breadth-first) and
//! printed one per line with their value, gradient and operation. This is a
//! debugging aid; nothing in the engine depends on it.

use std::collections::HashSet;
use std::fmt;

use log::{debug, log_enabled, Level};

use crate::node::{NodeId, Value};

const LAYER_SEPARATOR: &str =
    "-----------------------------------------------------------";

/// Group every node reachable from `root` by breadth-first distance.
///
/// `layers(root)[0]` is `[root]`, the next layer holds its operands, and so on.
/// A node shared by several consumers is listed once, in the layer of its
/// shortest distance from the root.
pub fn layers(root: &Value) -> Vec<Vec<Value>> {
    let mut seen: HashSet<NodeId> = HashSet::new();
    seen.insert(root.id());

    let mut layers = Vec::new();
    let mut frontier = vec![root.clone()];

    while !frontier.is_empty() {
        let mut next = Vec::new();
        for node in &frontier {
            for operand in node.operands() {
                if seen.insert(operand.id()) {
                    next.push(operand.clone());
                }
            }
        }
        layers.push(frontier);
        frontier = next;
    }

    layers
}

/// Render the layered view of the graph rooted at `root`, one node per line
/// and a separator after each layer.
pub fn render(root: &Value) -> String {
    let mut out = String::new();
    for layer in layers(root) {
        for node in layer {
            out.push_str(&node.to_string());
            out.push('\n');
        }
        out.push_str(LAYER_SEPARATOR);
        out.push('\n');
    }
    out
}

/// Write [`render`] to the `log` facade at debug level.
pub fn log_graph(root: &Value) {
    if log_enabled!(Level::Debug) {
        for line in render(root).lines() {
            debug!("{}", line);
        }
    }
}

impl fmt::Display for Value {
    /// `data 4.0000 | grad 1.0000` for leaves, with
    /// `| prev { + [-6.0000, 10.0000] }` appended for operator nodes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data {:6.4} | grad {:6.4}", self.value(), self.grad())?;
        if self.is_leaf() {
            return Ok(());
        }

        write!(f, " | prev {{ {} [", self.op().symbol())?;
        for (i, operand) in self.operands().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.4}", operand.value())?;
        }
        write!(f, "] }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{add, leaf, multiply, tanh};

    #[test]
    fn test_layers_group_by_distance() {
        let a = leaf(2.0);
        let b = leaf(-3.0);
        let c = leaf(10.0);
        let ab = multiply(&a, &b);
        let root = add(&ab, &c);

        let layers = layers(&root);

        assert_eq!(layers.len(), 3);
        assert_eq!(layers[0].len(), 1);
        assert!(layers[0][0].ptr_eq(&root));
        assert_eq!(layers[1].len(), 2);
        assert!(layers[1][0].ptr_eq(&ab));
        assert!(layers[1][1].ptr_eq(&c));
        assert_eq!(layers[2].len(), 2);
    }

    #[test]
    fn test_layers_list_shared_nodes_once() {
        let x = leaf(0.5);
        let sq = multiply(&x, &x);
        let root = add(&x, &tanh(&sq));

        let layers = layers(&root);
        let count: usize = layers.iter().map(Vec::len).sum();

        assert_eq!(count, 4);
        // x is at distance 1 through the direct edge
        assert!(layers[1].iter().any(|v| v.ptr_eq(&x)));
    }

    #[test]
    fn test_display_leaf_and_operator() {
        let a = leaf(2.0);
        let b = leaf(-3.0);
        let ab = multiply(&a, &b);
        ab.backward();

        assert_eq!(a.to_string(), "data 2.0000 | grad -3.0000");
        assert_eq!(
            ab.to_string(),
            "data -6.0000 | grad 1.0000 | prev { * [2.0000, -3.0000] }"
        );
    }

    #[test]
    fn test_render_has_separator_per_layer() {
        let root = tanh(&leaf(0.0));
        let text = render(&root);

        assert_eq!(text.matches(LAYER_SEPARATOR).count(), 2);
        assert!(text.starts_with("data 0.0000 | grad 0.0000 | prev { tanh [0.0000] }"));
    }

    #[test]
    fn test_log_graph_leaves_values_untouched() {
        let x = leaf(1.5);
        let root = tanh(&x);
        root.backward();
        let before = (root.value(), root.grad(), x.grad());

        log_graph(&root);

        assert_eq!(before, (root.value(), root.grad(), x.grad()));
    }
}
