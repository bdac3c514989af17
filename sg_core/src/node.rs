//! Core data structures for the computation graph.
//!
//! The graph is built from `Value` handles, which are reference-counted pointers
//! to internal `Node` structures. Cloning a handle shares the node, so one
//! sub-expression can feed any number of consumers (the graph is a DAG, not a
//! tree). The operation and operand list are fixed when a node is created; the
//! gradient lives in a `Cell` so it can be accumulated through shared handles.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for generating unique node IDs.
static NODE_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_node_id() -> NodeId {
    NodeId(NODE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Unique identifier for a node in the computation graph.
///
/// IDs increase monotonically, so an operand always has a smaller ID than every
/// node that consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

/// The operation that produced a node.
///
/// Negation, subtraction and division are composed from these primitives and
/// have no tag of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// A leaf: constant or parameter, no operands.
    Leaf,
    /// operands[0] + operands[1]
    Add,
    /// operands[0] * operands[1]
    Mul,
    /// operands[0] ^ operands[1]
    Pow,
    /// tanh(operands[0])
    Tanh,
    /// exp(operands[0])
    Exp,
}

impl Op {
    /// Number of operands a node with this tag carries.
    pub fn arity(self) -> usize {
        match self {
            Op::Leaf => 0,
            Op::Tanh | Op::Exp => 1,
            Op::Add | Op::Mul | Op::Pow => 2,
        }
    }

    /// Short label used by the graph printer.
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Leaf => "",
            Op::Add => "+",
            Op::Mul => "*",
            Op::Pow => "Pow",
            Op::Tanh => "tanh",
            Op::Exp => "exp",
        }
    }
}

/// Internal node structure.
pub(crate) struct Node {
    id: NodeId,
    value: Cell<f64>,
    grad: Cell<f64>,
    op: Op,
    operands: Vec<Value>,
}

impl Drop for Node {
    // Unlink operands iteratively; the default recursive drop overflows the
    // stack on long chains such as a loss summed over many terms.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.operands);
        while let Some(Value(rc)) = pending.pop() {
            if let Ok(mut node) = Rc::try_unwrap(rc) {
                pending.append(&mut node.operands);
            }
        }
    }
}

/// A scalar in the computation graph.
///
/// `Value` is a reference-counted handle to a `Node`; `clone` is O(1) and
/// yields another handle to the same node. Handles are single-threaded
/// (`!Send`), which is what lets the gradient be a plain `Cell`.
#[derive(Clone)]
pub struct Value(pub(crate) Rc<Node>);

impl Value {
    /// Create a leaf with the given value and a zero gradient.
    pub fn leaf(value: f64) -> Self {
        Value::from_op(Op::Leaf, value, Vec::new())
    }

    /// Create an operator node. Only the operator library calls this, and only
    /// with handles to nodes that already exist, which keeps the graph acyclic.
    pub(crate) fn from_op(op: Op, value: f64, operands: Vec<Value>) -> Self {
        debug_assert_eq!(operands.len(), op.arity(), "wrong operand count for {:?}", op);
        Value(Rc::new(Node {
            id: next_node_id(),
            value: Cell::new(value),
            grad: Cell::new(0.0),
            op,
            operands,
        }))
    }

    /// Identity of the underlying node.
    pub fn id(&self) -> NodeId {
        self.0.id
    }

    /// The forward value computed when the node was created.
    pub fn value(&self) -> f64 {
        self.0.value.get()
    }

    /// Overwrite the forward value.
    ///
    /// Meant for parameter leaves between training iterations. Nodes already
    /// built on top of this one keep the values they computed; rebuild the
    /// expression to see the change.
    pub fn set_value(&self, value: f64) {
        self.0.value.set(value);
    }

    /// Accumulated gradient of the last backward root(s) with respect to this node.
    pub fn grad(&self) -> f64 {
        self.0.grad.get()
    }

    pub fn set_grad(&self, grad: f64) {
        self.0.grad.set(grad);
    }

    pub fn zero_grad(&self) {
        self.0.grad.set(0.0);
    }

    pub(crate) fn add_grad(&self, delta: f64) {
        self.0.grad.set(self.0.grad.get() + delta);
    }

    pub fn op(&self) -> Op {
        self.0.op
    }

    /// Operands in construction order (empty for leaves).
    pub fn operands(&self) -> &[Value] {
        &self.0.operands
    }

    pub fn is_leaf(&self) -> bool {
        self.0.operands.is_empty()
    }

    /// Whether two handles point at the same node.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    // === Unary operations ===

    /// Hyperbolic tangent: tanh(self)
    pub fn tanh(&self) -> Value {
        crate::ops::tanh(self)
    }

    /// Exponential: exp(self)
    pub fn exp(&self) -> Value {
        crate::ops::exponential(self)
    }

    /// Raise to the power held by another node: self^exponent
    pub fn pow(&self, exponent: &Value) -> Value {
        crate::ops::power(self, exponent)
    }

    /// Raise to a constant power. The exponent becomes a fresh leaf.
    pub fn powf(&self, exponent: f64) -> Value {
        crate::ops::power(self, &Value::leaf(exponent))
    }

    /// Run reverse-mode differentiation with this node as the root.
    ///
    /// Gradients are added into every reachable node's `grad`; see
    /// [`crate::backward`] for the accumulation contract.
    pub fn backward(&self) {
        crate::backward::backward(self)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::leaf(value)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("id", &self.id())
            .field("op", &self.op())
            .field("value", &self.value())
            .field("grad", &self.grad())
            .field("operands", &self.operands().iter().map(Value::id).collect::<Vec<_>>())
            .finish()
    }
}
