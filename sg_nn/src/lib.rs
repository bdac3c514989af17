//! # sg_nn - Neural Network Building Blocks for sg_core
//!
//! Every piece here is built purely from the `sg_core` operators; nothing adds
//! new derivative rules.
//!
//! - **Layers**: [`Neuron`] (tanh unit), [`Layer`], [`Mlp`]
//! - **Losses**: [`sse_loss`] (sum of squared errors)
//! - **Optimizers**: [`Sgd`] (plain gradient descent)
//!
//! Parameter initialization takes an explicit random generator, so a fixed
//! seed reproduces a network exactly.
//!
//! ## Example: Training a Small MLP
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use sg_core::leaf;
//! use sg_nn::{sse_loss, Mlp, Module, Sgd};
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let mlp = Mlp::new(3, &[4, 4, 1], &mut rng);
//! let opt = Sgd::new(0.05);
//!
//! let xs = [[2.0, 3.0, -1.0], [3.0, -1.0, 0.5], [0.5, 1.0, 1.0], [1.0, 1.0, -1.0]];
//! let ys = [1.0, -1.0, -1.0, 1.0];
//!
//! for _ in 0..10 {
//!     let mut preds = Vec::new();
//!     for x in &xs {
//!         let input: Vec<_> = x.iter().map(|&v| leaf(v)).collect();
//!         preds.push(mlp.forward(&input).unwrap()[0].clone());
//!     }
//!     let targets: Vec<_> = ys.iter().map(|&y| leaf(y)).collect();
//!     let loss = sse_loss(&preds, &targets).unwrap();
//!
//!     mlp.zero_grad();
//!     loss.backward();
//!     opt.step(&mlp.parameters());
//! }
//! ```

pub mod error;
pub mod layers;
pub mod loss;
pub mod module;
pub mod optim;

// Re-exports for convenience
pub use error::NnError;
pub use layers::{Layer, Mlp, Neuron};
pub use loss::sse_loss;
pub use module::Module;
pub use optim::Sgd;
