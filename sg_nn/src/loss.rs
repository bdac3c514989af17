//! Loss functions.

use sg_core::{add, leaf, power, subtract, Value};

use crate::error::NnError;

/// Sum of squared errors: `sum_i (pred_i - target_i)^2`.
///
/// Each term is built as `power(pred - target, 2)` with its own exponent leaf
/// and added onto a running total that starts at a zero leaf, so an empty
/// input yields 0.
pub fn sse_loss(pred: &[Value], target: &[Value]) -> Result<Value, NnError> {
    if pred.len() != target.len() {
        return Err(NnError::ArityMismatch {
            operation: "sse loss",
            expected: target.len(),
            actual: pred.len(),
        });
    }

    let loss = pred.iter().zip(target).fold(leaf(0.0), |sum, (p, t)| {
        add(&sum, &power(&subtract(p, t), &leaf(2.0)))
    });

    Ok(loss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sg_core::{topological_order, Op};

    fn leaves(values: &[f64]) -> Vec<Value> {
        values.iter().map(|&v| leaf(v)).collect()
    }

    #[test]
    fn test_sse_loss_zero() {
        let pred = leaves(&[1.0, 2.0, 3.0]);
        let target = leaves(&[1.0, 2.0, 3.0]);

        assert_eq!(sse_loss(&pred, &target).unwrap().value(), 0.0);
    }

    #[test]
    fn test_sse_loss_nonzero() {
        let pred = leaves(&[0.0, 0.5]);
        let target = leaves(&[1.0, -1.0]);

        let loss = sse_loss(&pred, &target).unwrap();
        assert_relative_eq!(loss.value(), 1.0 + 2.25, epsilon = 1e-12);
    }

    #[test]
    fn test_sse_loss_gradient() {
        // d/dp (p - t)^2 = 2 (p - t)
        let pred = leaves(&[0.25, -0.5]);
        let target = leaves(&[1.0, 1.0]);

        sse_loss(&pred, &target).unwrap().backward();

        assert_relative_eq!(pred[0].grad(), -1.5, epsilon = 1e-12);
        assert_relative_eq!(pred[1].grad(), -3.0, epsilon = 1e-12);
        assert_relative_eq!(target[0].grad(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_sse_loss_exponents_are_not_shared() {
        let pred = leaves(&[0.25, -0.5, 1.0]);
        let target = leaves(&[1.0, 1.0, 0.0]);

        let loss = sse_loss(&pred, &target).unwrap();
        let exponents: Vec<Value> = topological_order(&loss)
            .into_iter()
            .filter(|v| v.op() == Op::Pow)
            .map(|v| v.operands()[1].clone())
            .collect();

        assert_eq!(exponents.len(), 3);
        for (i, a) in exponents.iter().enumerate() {
            assert_eq!(a.value(), 2.0);
            assert!(exponents[i + 1..].iter().all(|b| !a.ptr_eq(b)));
        }
    }

    #[test]
    fn test_sse_loss_empty() {
        assert_eq!(sse_loss(&[], &[]).unwrap().value(), 0.0);
    }

    #[test]
    fn test_sse_loss_length_mismatch() {
        let err = sse_loss(&leaves(&[1.0]), &leaves(&[1.0, 2.0])).unwrap_err();
        assert_eq!(
            err,
            NnError::ArityMismatch {
                operation: "sse loss",
                expected: 2,
                actual: 1,
            }
        );
    }
}
