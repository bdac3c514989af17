//! Common interface for anything that owns trainable parameters.

use sg_core::Value;

/// A network component with trainable leaf parameters.
pub trait Module {
    /// Handles to every parameter leaf, in a stable order.
    fn parameters(&self) -> Vec<Value>;

    /// Reset the gradient of every parameter to zero.
    fn zero_grad(&self) {
        for p in self.parameters() {
            p.zero_grad();
        }
    }
}
