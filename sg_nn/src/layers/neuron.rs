//! A single tanh unit.

use rand::Rng;
use sg_core::{add, leaf, multiply, tanh, Value};

use crate::error::NnError;
use crate::module::Module;

/// One unit: `tanh(bias + sum_i weight_i * x_i)`.
pub struct Neuron {
    /// One weight per input.
    pub weights: Vec<Value>,
    pub bias: Value,
}

impl Neuron {
    /// Create a unit with `nin` inputs. Weights and bias are drawn uniformly
    /// from [-1, 1) using the caller's generator.
    pub fn new<R: Rng>(nin: usize, rng: &mut R) -> Self {
        let weights = (0..nin).map(|_| leaf(rng.gen_range(-1.0..1.0))).collect();
        let bias = leaf(rng.gen_range(-1.0..1.0));
        Neuron { weights, bias }
    }

    /// Create a unit from explicit parameter values.
    pub fn from_values(weights: &[f64], bias: f64) -> Self {
        Neuron {
            weights: weights.iter().map(|&w| leaf(w)).collect(),
            bias: leaf(bias),
        }
    }

    /// Number of inputs.
    pub fn nin(&self) -> usize {
        self.weights.len()
    }

    /// Forward pass. The weighted sum is accumulated left to right starting
    /// from the bias.
    pub fn forward(&self, x: &[Value]) -> Result<Value, NnError> {
        if x.len() != self.weights.len() {
            return Err(NnError::ArityMismatch {
                operation: "neuron forward",
                expected: self.weights.len(),
                actual: x.len(),
            });
        }

        let act = self
            .weights
            .iter()
            .zip(x)
            .fold(self.bias.clone(), |act, (w, xi)| add(&act, &multiply(w, xi)));

        Ok(tanh(&act))
    }
}

impl Module for Neuron {
    fn parameters(&self) -> Vec<Value> {
        let mut params = self.weights.clone();
        params.push(self.bias.clone());
        params
    }
}
