use serde::{Deserialize, Serialize};

use crate::error::{RegressionError, Result};

/// A fitted linear function: one coefficient per feature plus an intercept.
///
/// Immutable after construction; evaluation is a pure dot product with no
/// internal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    /// Creates a model from fitted parameters.
    ///
    /// # Panics
    /// - if `coefficients` is empty
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        assert!(
            !coefficients.is_empty(),
            "model must have at least one coefficient"
        );
        Self {
            coefficients,
            intercept,
        }
    }

    /// Returns the number of features the model was trained on.
    #[inline]
    pub fn num_features(&self) -> usize {
        self.coefficients.len()
    }

    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Evaluates the model on a feature vector.
    ///
    /// # Args
    /// * `features` - Ordered feature values, one per coefficient.
    ///
    /// # Returns
    /// The raw (unrounded) predicted scalar.
    ///
    /// # Errors
    /// Returns `RegressionError::ShapeMismatch` if `features` does not match
    /// the trained feature count.
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(RegressionError::ShapeMismatch {
                what: "features",
                got: features.len(),
                expected: self.coefficients.len(),
            });
        }

        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(c, x)| c * x)
            .sum();

        Ok(dot + self.intercept)
    }
}
