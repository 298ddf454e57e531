pub mod artifact;
pub mod dataset;
pub mod error;
pub mod model;
pub mod train;

pub use dataset::Dataset;
pub use error::RegressionError;
pub use model::LinearModel;
pub use train::OlsTrainer;
