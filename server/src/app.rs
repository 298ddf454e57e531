use std::sync::Arc;

use httpcomms::{Method, Request, Response, StatusCode};
use log::{debug, warn};
use regression::LinearModel;
use serde::Serialize;

use crate::schema::{ErrorBody, MODEL_VERSION, PredictRequest, PredictResponse};

/// Application context: routing plus the process-wide read-only model.
///
/// The model is injected at construction and never reassigned, so every
/// handler is a pure function of (model, request). Tests build an `App`
/// around any model they like without touching process state.
#[derive(Clone)]
pub struct App {
    model: Arc<LinearModel>,
}

impl App {
    /// Creates the application context around a loaded model.
    pub fn new(model: Arc<LinearModel>) -> Self {
        Self { model }
    }

    /// Routes one request to a response.
    pub fn handle(&self, req: &Request) -> Response {
        match (req.method(), req.target()) {
            (Method::Post, "/predict") => self.predict(req),
            (method, "/predict") => {
                debug!("rejecting {} /predict", method.as_str());
                json(
                    StatusCode::MethodNotAllowed,
                    &ErrorBody {
                        detail: "method not allowed, use POST".to_string(),
                    },
                )
                .with_header("allow", "POST")
            }
            (_, target) => json(
                StatusCode::NotFound,
                &ErrorBody {
                    detail: format!("no route for {target}"),
                },
            ),
        }
    }

    fn predict(&self, req: &Request) -> Response {
        let body: PredictRequest = match serde_json::from_slice(req.body()) {
            Ok(body) => body,
            Err(e) => {
                warn!("rejecting malformed predict body: {e}");
                return unprocessable(format!("invalid request body: {e}"));
            }
        };

        let raw = match self.model.predict(&body.features) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("rejecting predict request: {e}");
                return unprocessable(e.to_string());
            }
        };

        let prediction = round2(raw);
        debug!("prediction computed: features={:?} -> {prediction}", body.features);

        json(
            StatusCode::Ok,
            &PredictResponse {
                prediction,
                version: MODEL_VERSION,
            },
        )
    }
}

/// Builds a JSON response from any serializable body.
pub(crate) fn json(status: StatusCode, body: &impl Serialize) -> Response {
    // Serialization of derived schema types with string keys cannot fail.
    let bytes = serde_json::to_vec(body).unwrap();
    Response::new(status).with_body("application/json", bytes)
}

fn unprocessable(detail: String) -> Response {
    json(StatusCode::UnprocessableEntity, &ErrorBody { detail })
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
