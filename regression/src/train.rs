use std::num::NonZeroUsize;

use ndarray::Array1;

use crate::{Dataset, LinearModel};

const DEFAULT_LEARNING_RATE: f64 = 0.01;
const DEFAULT_EPOCHS: NonZeroUsize = NonZeroUsize::new(20_000).unwrap();

/// Ordinary-least-squares fitting by full-batch gradient descent.
///
/// Parameters start at zero and follow a fixed schedule, so the fit is
/// bit-deterministic run to run. Starting from the origin also means that
/// for a rank-deficient feature matrix the iteration converges to the
/// minimum-norm least-squares solution instead of diverging or requiring a
/// pseudo-inverse.
#[derive(Debug, Clone)]
pub struct OlsTrainer {
    learning_rate: f64,
    epochs: NonZeroUsize,
}

impl Default for OlsTrainer {
    fn default() -> Self {
        Self::new(DEFAULT_LEARNING_RATE, DEFAULT_EPOCHS)
    }
}

impl OlsTrainer {
    /// Creates a new trainer.
    ///
    /// # Args
    /// * `learning_rate` - Step size for each gradient update.
    /// * `epochs` - Number of full-batch updates to run.
    ///
    /// # Returns
    /// An `OlsTrainer` instance.
    pub fn new(learning_rate: f64, epochs: NonZeroUsize) -> Self {
        Self {
            learning_rate,
            epochs,
        }
    }

    /// Fits a linear model to `dataset`, minimizing mean squared error.
    ///
    /// # Args
    /// * `dataset` - The samples to fit against.
    ///
    /// # Returns
    /// The fitted model (coefficients plus intercept).
    pub fn fit(&self, dataset: &Dataset) -> LinearModel {
        let x = dataset.features();
        let y = dataset.targets();
        let n = dataset.len() as f64;

        let mut weights = Array1::<f64>::zeros(dataset.num_features());
        let mut intercept = 0.0;

        for _ in 0..self.epochs.get() {
            let residuals = x.dot(&weights) + intercept - y;

            // d/dw (1/n)||Xw + b - y||^2
            let grad_w = x.t().dot(&residuals) * (2.0 / n);
            let grad_b = 2.0 * residuals.mean().unwrap_or(0.0);

            weights.scaled_add(-self.learning_rate, &grad_w);
            intercept -= self.learning_rate * grad_b;
        }

        LinearModel::new(weights.to_vec(), intercept)
    }
}
