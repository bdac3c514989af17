//! # sg_core - Scalar Reverse-mode Automatic Differentiation
//!
//! This crate builds expression graphs over `f64` scalars and differentiates
//! them by reverse accumulation (backpropagation). Every operation evaluates its
//! result immediately (define-by-run) and records its operands, so once a root
//! of interest exists a single backward pass yields d(root)/d(node) for every
//! node that feeds it.
//!
//! ## Quick Start
//!
//! ```
//! use sg_core::{add, leaf, multiply};
//!
//! let a = leaf(2.0);
//! let b = leaf(-3.0);
//! let c = leaf(10.0);
//!
//! // d = a * b + c
//! let d = add(&multiply(&a, &b), &c);
//! assert_eq!(d.value(), 4.0);
//!
//! d.backward();
//! assert_eq!(a.grad(), -3.0);
//! assert_eq!(b.grad(), 2.0);
//! assert_eq!(c.grad(), 1.0);
//! ```
//!
//! The same graph can be written with operator overloads:
//!
//! ```
//! use sg_core::leaf;
//!
//! let x = leaf(3.0);
//! let y = leaf(2.0);
//! let z = (&x * &y + x.tanh()) / (&y + 1.0);
//! z.backward();
//! assert!(x.grad() > 0.0);
//! ```
//!
//! ## Supported Operations
//!
//! | Category | Operations |
//! |----------|------------|
//! | Primitive | [`add`], [`multiply`], [`power`], [`tanh`], [`exponential`] |
//! | Composed | [`negate`], [`subtract`], [`divide`] |
//! | Overloads | `+`, `-`, `*`, `/`, unary `-` on `Value`, `&Value` and `f64` |
//!
//! ## Gradient Contract
//!
//! Gradients are *added* into each node's `grad`. A node consumed by several
//! expressions receives the sum of every contribution. The engine never clears
//! gradients: zero them (for example with [`zero_grad_graph`]) before an
//! independent pass, otherwise a repeated pass adds the same amounts again.
//!
//! Invalid real results such as a negative base to a fractional power are NaN
//! and propagate silently, exactly like plain floating-point arithmetic.
//!
//! ## Architecture
//!
//! - **[`Value`]**: reference-counted handle to a graph node. Cloning is O(1).
//! - **[`backward`]** / **[`topological_order`]**: the reverse-mode driver and
//!   the dependency ordering it walks.
//! - **[`graph`]**: layered, printable view of a graph for debugging.
//! - **[`check_gradients`]**: validation against finite differences.

mod backward;
mod error;
mod finite_diff;
pub mod graph;
mod node;
mod ops;

pub use backward::{backward, topological_order, zero_grad_graph};
pub use error::GradCheckError;
pub use finite_diff::{check_gradients, finite_diff_grad, max_grad_error};
pub use node::{NodeId, Op, Value};
pub use ops::{
    add, divide, exponential, leaf, local_gradients, multiply, negate, power, subtract, tanh,
};
