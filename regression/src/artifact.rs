//! Model artifact persistence.
//!
//! The trainer writes the fitted model to disk as JSON; the server reads it
//! back exactly once at startup. Both sides share this module, so the
//! serialization scheme cannot drift between them.

use std::{fmt, fs, io, path::Path};

use crate::LinearModel;

/// Errors produced while persisting or loading a model artifact.
#[derive(Debug)]
pub enum ArtifactError {
    Io(io::Error),
    Format(serde_json::Error),
    /// The artifact decoded, but its contents cannot back a model.
    Invalid(&'static str),
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactError::Io(e) => write!(f, "io error: {e}"),
            ArtifactError::Format(e) => write!(f, "malformed artifact: {e}"),
            ArtifactError::Invalid(msg) => write!(f, "invalid artifact: {msg}"),
        }
    }
}

impl std::error::Error for ArtifactError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArtifactError::Io(e) => Some(e),
            ArtifactError::Format(e) => Some(e),
            ArtifactError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ArtifactError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ArtifactError {
    fn from(value: serde_json::Error) -> Self {
        Self::Format(value)
    }
}

/// Boundary conversion for binaries / I/O APIs.
impl From<ArtifactError> for io::Error {
    fn from(value: ArtifactError) -> Self {
        match value {
            ArtifactError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

/// Writes `model` to `path` as pretty-printed JSON, overwriting any
/// previous artifact.
///
/// # Errors
/// Returns `ArtifactError::Io` if the file cannot be written.
pub fn save(model: &LinearModel, path: &Path) -> Result<(), ArtifactError> {
    let json = serde_json::to_string_pretty(model)?;
    fs::write(path, json)?;
    Ok(())
}

/// Loads a model from `path`.
///
/// # Errors
/// Returns `ArtifactError` if the file is missing, unreadable, not valid
/// JSON, or decodes to a model with no coefficients.
pub fn load(path: &Path) -> Result<LinearModel, ArtifactError> {
    let bytes = fs::read(path)?;
    let model: LinearModel = serde_json::from_slice(&bytes)?;

    if model.num_features() == 0 {
        return Err(ArtifactError::Invalid("artifact has no coefficients"));
    }

    Ok(model)
}
