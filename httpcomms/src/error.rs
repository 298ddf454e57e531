use std::{fmt, io};

use crate::response::StatusCode;

/// Wire-level failures while reading a request.
#[derive(Debug)]
pub enum HttpError {
    Io(io::Error),
    /// The request violates HTTP framing and cannot be interpreted.
    BadRequest(&'static str),
    /// The request line plus headers exceeded the configured limit.
    HeadTooLarge { limit: usize },
    /// The declared body length exceeded the configured limit.
    BodyTooLarge { got: usize, limit: usize },
}

impl HttpError {
    /// Status a server should answer with, if the connection is still
    /// usable for a response.
    ///
    /// # Returns
    /// `None` for transport failures, where no response can be delivered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HttpError::Io(_) => None,
            HttpError::BadRequest(_) => Some(StatusCode::BadRequest),
            HttpError::HeadTooLarge { .. } | HttpError::BodyTooLarge { .. } => {
                Some(StatusCode::PayloadTooLarge)
            }
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Io(e) => write!(f, "io error: {e}"),
            HttpError::BadRequest(msg) => write!(f, "bad request: {msg}"),
            HttpError::HeadTooLarge { limit } => {
                write!(f, "request head exceeds {limit} bytes")
            }
            HttpError::BodyTooLarge { got, limit } => {
                write!(f, "request body of {got} bytes exceeds {limit} bytes")
            }
        }
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HttpError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for HttpError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Boundary conversion for binaries / I/O APIs.
impl From<HttpError> for io::Error {
    fn from(value: HttpError) -> Self {
        match value {
            HttpError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
