use serde::{Deserialize, Serialize};

/// Version label attached to every prediction response.
pub const MODEL_VERSION: &str = "v1.0";

/// Body of a `POST /predict` request.
///
/// Only `features` is interpreted; unknown fields are ignored. Anything
/// that fails to decode into this shape is a validation failure, not a
/// server error.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub features: Vec<f64>,
}

/// Body of a successful prediction.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: f64,
    pub version: &'static str,
}

/// JSON error body attached to every failure response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}
