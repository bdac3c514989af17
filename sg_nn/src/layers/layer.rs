//! A fully connected layer of tanh units.

use rand::Rng;
use sg_core::Value;

use crate::error::NnError;
use crate::layers::Neuron;
use crate::module::Module;

/// `nout` independent units that all read the same `nin` inputs.
pub struct Layer {
    pub neurons: Vec<Neuron>,
}

impl Layer {
    pub fn new<R: Rng>(nin: usize, nout: usize, rng: &mut R) -> Self {
        let neurons = (0..nout).map(|_| Neuron::new(nin, rng)).collect();
        Layer { neurons }
    }

    /// Build a layer from existing units.
    pub fn from_neurons(neurons: Vec<Neuron>) -> Self {
        Layer { neurons }
    }

    pub fn nout(&self) -> usize {
        self.neurons.len()
    }

    /// Forward pass: one output per unit.
    pub fn forward(&self, x: &[Value]) -> Result<Vec<Value>, NnError> {
        self.neurons.iter().map(|n| n.forward(x)).collect()
    }
}

impl Module for Layer {
    fn parameters(&self) -> Vec<Value> {
        self.neurons.iter().flat_map(Neuron::parameters).collect()
    }
}
