use thiserror::Error;

/// Failure reported by [`crate::check_gradients`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("gradient mismatch for input {index}: analytical {analytical} vs numerical {numerical} (difference {difference})")]
    GradientMismatch {
        index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error("analytical gradient for input {index} is not finite: {value}")]
    NonFiniteAnalytical { index: usize, value: f64 },

    #[error("numerical gradient for input {index} is not finite: {value}")]
    NonFiniteNumerical { index: usize, value: f64 },
}
