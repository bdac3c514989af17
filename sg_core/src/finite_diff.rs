//! Finite difference utilities for gradient verification.
//!
//! [`finite_diff_grad`] estimates partial derivatives of a plain function;
//! [`check_gradients`] compares those estimates against what the backward
//! pass accumulates on the leaves of a graph.

use log::debug;

use crate::error::GradCheckError;
use crate::node::Value;

/// Compute gradients using central finite differences.
///
/// # Arguments
/// * `f` - Function that takes a slice of input values and returns a scalar
/// * `point` - The point at which to compute gradients
/// * `eps` - Step size (typically 1e-7 to 1e-5)
///
/// # Example
/// ```
/// use sg_core::finite_diff_grad;
///
/// // f(x, y) = x^2 + y^2
/// let f = |v: &[f64]| v[0] * v[0] + v[1] * v[1];
/// let grads = finite_diff_grad(f, &[3.0, 4.0], 1e-7);
///
/// assert!((grads[0] - 6.0).abs() < 1e-5);
/// assert!((grads[1] - 8.0).abs() < 1e-5);
/// ```
pub fn finite_diff_grad<F>(f: F, point: &[f64], eps: f64) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let mut perturbed = point.to_vec();

    point
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            perturbed[i] = x + eps;
            let f_plus = f(&perturbed);
            perturbed[i] = x - eps;
            let f_minus = f(&perturbed);
            perturbed[i] = x;

            (f_plus - f_minus) / (2.0 * eps)
        })
        .collect()
}

/// Largest absolute element-wise difference between two gradient vectors.
///
/// Panics if the lengths differ.
pub fn max_grad_error(grad1: &[f64], grad2: &[f64]) -> f64 {
    assert_eq!(grad1.len(), grad2.len(), "gradient vectors differ in length");
    grad1
        .iter()
        .zip(grad2)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
}

/// Check backward-pass gradients against central finite differences.
///
/// `build` receives one fresh leaf per entry of `point` and returns the root
/// of the expression. The root is differentiated once, then each leaf's
/// gradient `a` is compared with the numerical estimate `n`; the check
/// passes when `|a - n| <= tolerance * max(1, |a|, |n|)` for every input.
///
/// Constants that should not be checked (for example the exponent of
/// `power`) belong inside `build`, not in `point`.
pub fn check_gradients<F>(
    build: F,
    point: &[f64],
    eps: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Value]) -> Value,
{
    let leaves: Vec<Value> = point.iter().map(|&x| Value::leaf(x)).collect();
    build(&leaves).backward();

    let numerical = finite_diff_grad(
        |vals: &[f64]| {
            let leaves: Vec<Value> = vals.iter().map(|&x| Value::leaf(x)).collect();
            build(&leaves).value()
        },
        point,
        eps,
    );

    for (index, (leaf, numerical)) in leaves.iter().zip(numerical).enumerate() {
        let analytical = leaf.grad();
        if !analytical.is_finite() {
            return Err(GradCheckError::NonFiniteAnalytical {
                index,
                value: analytical,
            });
        }
        if !numerical.is_finite() {
            return Err(GradCheckError::NonFiniteNumerical {
                index,
                value: numerical,
            });
        }

        let difference = (analytical - numerical).abs();
        let scale = 1.0_f64.max(analytical.abs()).max(numerical.abs());
        debug!(
            "input {}: analytical {} numerical {} difference {}",
            index, analytical, numerical, difference
        );
        if difference > tolerance * scale {
            return Err(GradCheckError::GradientMismatch {
                index,
                analytical,
                numerical,
                difference,
            });
        }
    }

    Ok(())
}
