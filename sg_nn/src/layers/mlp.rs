//! Multi-layer perceptron.

use rand::Rng;
use sg_core::Value;

use crate::error::NnError;
use crate::layers::Layer;
use crate::module::Module;

/// A stack of [`Layer`]s; each layer's outputs feed the next.
pub struct Mlp {
    /// `[nin, nouts...]`
    pub sizes: Vec<usize>,
    pub layers: Vec<Layer>,
}

impl Mlp {
    /// `Mlp::new(3, &[4, 4, 1], rng)` builds 3 -> 4 -> 4 -> 1.
    ///
    /// With an empty `nouts` the network has no layers and `forward` returns
    /// its input unchanged.
    pub fn new<R: Rng>(nin: usize, nouts: &[usize], rng: &mut R) -> Self {
        let mut sizes = Vec::with_capacity(nouts.len() + 1);
        sizes.push(nin);
        sizes.extend_from_slice(nouts);

        let layers = sizes
            .windows(2)
            .map(|pair| Layer::new(pair[0], pair[1], rng))
            .collect();

        Mlp { sizes, layers }
    }

    pub fn forward(&self, x: &[Value]) -> Result<Vec<Value>, NnError> {
        let mut out = x.to_vec();
        for layer in &self.layers {
            out = layer.forward(&out)?;
        }
        Ok(out)
    }
}

impl Module for Mlp {
    fn parameters(&self) -> Vec<Value> {
        self.layers.iter().flat_map(Layer::parameters).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sg_core::leaf;

    #[test]
    fn test_mlp_forward_and_backward() {
        let mut rng = StdRng::seed_from_u64(42);
        let mlp = Mlp::new(3, &[4, 4, 1], &mut rng);

        assert_eq!(mlp.sizes, vec![3, 4, 4, 1]);
        assert_eq!(mlp.layers.len(), 3);
        assert_eq!(mlp.parameters().len(), 4 * 4 + 4 * 5 + 5);

        let out = mlp.forward(&[leaf(2.0), leaf(3.0), leaf(-1.0)]).unwrap();
        assert_eq!(out.len(), 1);

        out[0].backward();
        assert!(mlp.parameters().iter().any(|p| p.grad() != 0.0));

        mlp.zero_grad();
        assert!(mlp.parameters().iter().all(|p| p.grad() == 0.0));
    }

    #[test]
    fn test_mlp_is_reproducible_from_seed() {
        let a = Mlp::new(2, &[3, 1], &mut StdRng::seed_from_u64(9));
        let b = Mlp::new(2, &[3, 1], &mut StdRng::seed_from_u64(9));

        let x = [leaf(0.5), leaf(-0.25)];
        let ya = a.forward(&x).unwrap()[0].value();
        let yb = b.forward(&x).unwrap()[0].value();
        assert_eq!(ya, yb);
    }

    #[test]
    fn test_mlp_without_layers_is_identity() {
        let mlp = Mlp::new(2, &[], &mut StdRng::seed_from_u64(0));
        let x = [leaf(1.0), leaf(2.0)];
        let out = mlp.forward(&x).unwrap();

        assert!(out[0].ptr_eq(&x[0]));
        assert!(out[1].ptr_eq(&x[1]));
        assert!(mlp.parameters().is_empty());
    }

    #[test]
    fn test_mlp_rejects_wrong_input_width() {
        let mlp = Mlp::new(3, &[2], &mut StdRng::seed_from_u64(0));
        assert!(mlp.forward(&[leaf(1.0), leaf(2.0)]).is_err());
    }
}
