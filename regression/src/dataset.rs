use ndarray::{Array1, Array2};

/// A fixed in-memory supervised dataset: a feature matrix (one row per
/// sample) and a target per row.
///
/// Design goals:
/// - deterministic and test-friendly
/// - small API surface
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Array2<f64>,
    targets: Array1<f64>,
}

impl Dataset {
    /// Creates a new dataset from owned buffers.
    ///
    /// # Panics
    /// - if the number of feature rows differs from the number of targets
    /// - if the dataset is empty or has zero feature columns
    pub fn new(features: Array2<f64>, targets: Array1<f64>) -> Self {
        assert_eq!(
            features.nrows(),
            targets.len(),
            "feature rows and targets must have same length"
        );
        assert!(!targets.is_empty(), "dataset must be non-empty");
        assert!(features.ncols() > 0, "samples must have at least one feature");
        Self { features, targets }
    }

    /// Returns the number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Returns the number of features per sample.
    #[inline]
    pub fn num_features(&self) -> usize {
        self.features.ncols()
    }

    #[inline]
    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    #[inline]
    pub fn targets(&self) -> &Array1<f64> {
        &self.targets
    }
}
