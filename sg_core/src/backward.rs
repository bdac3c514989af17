//! Reverse-mode automatic differentiation.
//!
//! The backward pass computes gradients by:
//! 1. Building a dependency ordering of the nodes reachable from the root
//! 2. Walking that ordering in reverse, pushing each node's adjoint into its
//!    operands through the node's local derivative rule
//! 3. Adding the adjoints of this pass into every node's stored gradient
//!
//! The driver never clears gradients. Between independent passes the caller
//! zeroes them (see [`zero_grad_graph`]); a second pass over the same graph
//! without zeroing adds the same amounts again, doubling every gradient.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::node::{NodeId, Value};
use crate::ops::local_gradients;

/// Compute d(root)/d(node) for every node reachable from `root` and add it to
/// that node's gradient.
///
/// The root is seeded with 1.0 for this pass and that seed is *added* to its
/// stored gradient like every other adjoint. A root whose gradient was 5.0
/// ends the pass at 6.0; zero it first to get exactly 1.0.
pub fn backward(root: &Value) {
    // Step 1: dependency ordering, root last
    let order = topological_order(root);
    debug!("backward from node {:?}: {} reachable nodes", root.id(), order.len());

    // Step 2: seed the root. d(root)/d(root) = 1
    let mut adjoints: HashMap<NodeId, f64> = HashMap::with_capacity(order.len());
    adjoints.insert(root.id(), 1.0);

    // Step 3: reverse walk. Every consumer of a node precedes it here, so its
    // adjoint is complete by the time its own rule runs.
    for node in order.iter().rev() {
        if node.is_leaf() {
            continue;
        }

        let adjoint = adjoints.get(&node.id()).copied().unwrap_or(0.0);
        let local = local_gradients(node.op(), node.operands(), node.value());
        trace!(
            "node {:?} ({:?}) adjoint {} local {:?}",
            node.id(),
            node.op(),
            adjoint,
            &local[..node.operands().len()]
        );

        for (operand, local_grad) in node.operands().iter().zip(local) {
            // Chain rule: operand_adjoint += local_gradient * node_adjoint
            *adjoints.entry(operand.id()).or_insert(0.0) += local_grad * adjoint;
        }
    }

    // Step 4: accumulate into the stored gradients
    for node in &order {
        if let Some(&adjoint) = adjoints.get(&node.id()) {
            node.add_grad(adjoint);
        }
    }
}

/// Order every node reachable from `root` so that each node comes after all
/// of its operands. Each node appears once; `root` is last.
///
/// Depth-first, operands visited first-to-second, with nodes identified by
/// [`NodeId`] rather than by value. The traversal keeps its own stack so long
/// chains do not grow the call stack.
pub fn topological_order(root: &Value) -> Vec<Value> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut order = Vec::new();

    // (node, index of the next operand to visit)
    let mut stack: Vec<(Value, usize)> = vec![(root.clone(), 0)];
    visited.insert(root.id());

    while let Some((node, next)) = stack.last_mut() {
        match node.operands().get(*next).cloned() {
            Some(operand) => {
                *next += 1;
                if visited.insert(operand.id()) {
                    stack.push((operand, 0));
                }
            }
            None => {
                // All operands emitted, so this node can follow them
                if let Some((done, _)) = stack.pop() {
                    order.push(done);
                }
            }
        }
    }

    order
}

/// Reset the gradient of every node reachable from `root` to zero.
pub fn zero_grad_graph(root: &Value) {
    for node in topological_order(root) {
        node.zero_grad();
    }
}
