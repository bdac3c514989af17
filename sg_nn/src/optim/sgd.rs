//! Plain gradient descent.

use log::trace;
use sg_core::Value;

/// Vanilla gradient descent: `value -= learning_rate * grad` on each parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Self {
        Sgd { learning_rate }
    }

    /// Apply one update to every parameter using its accumulated gradient.
    pub fn step(&self, params: &[Value]) {
        for p in params {
            let updated = p.value() - self.learning_rate * p.grad();
            trace!("param {:?}: {} -> {}", p.id(), p.value(), updated);
            p.set_value(updated);
        }
    }

    /// Reset every parameter's gradient before the next backward pass.
    pub fn zero_grad(&self, params: &[Value]) {
        for p in params {
            p.zero_grad();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sg_core::leaf;

    #[test]
    fn test_sgd_step() {
        let params = vec![leaf(1.0), leaf(2.0), leaf(3.0)];
        for (p, g) in params.iter().zip([0.1, 0.2, 0.3]) {
            p.set_grad(g);
        }

        Sgd::new(0.1).step(&params);

        let expected = [0.99, 1.98, 2.97];
        for (p, e) in params.iter().zip(expected) {
            assert_relative_eq!(p.value(), e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sgd_zero_grad() {
        let params = vec![leaf(1.0), leaf(2.0)];
        params[0].set_grad(4.0);
        params[1].set_grad(-1.0);

        Sgd::new(0.5).zero_grad(&params);

        assert!(params.iter().all(|p| p.grad() == 0.0));
        assert_eq!(params[0].value(), 1.0);
    }

    #[test]
    fn test_sgd_descends_a_parabola() {
        // minimise (w - 3)^2 by rebuilding the graph each step
        let w = leaf(0.0);
        let opt = Sgd::new(0.1);

        for _ in 0..100 {
            opt.zero_grad(&[w.clone()]);
            let diff = sg_core::subtract(&w, &leaf(3.0));
            sg_core::multiply(&diff, &diff).backward();
            opt.step(&[w.clone()]);
        }

        assert_relative_eq!(w.value(), 3.0, epsilon = 1e-6);
    }
}
