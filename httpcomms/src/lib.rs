//! Minimal HTTP/1.1 plumbing over any async byte stream.
//!
//! Framing only: request parsing and response encoding. Routing, bodies'
//! meaning and error policy belong to the caller.

mod error;
mod receiver;
mod request;
mod response;
mod sender;

use tokio::io::{AsyncRead, AsyncWrite};

pub use error::HttpError;
pub use receiver::HttpReceiver;
pub use request::{HttpVersion, Method, Request};
pub use response::{Response, StatusCode};
pub use sender::HttpSender;

/// Creates both `HttpReceiver` and `HttpSender` halves of a connection.
///
/// Given a reader and writer creates and returns both ends of the
/// communication.
///
/// # Arguments
/// * `rx` - An async readable.
/// * `tx` - An async writable.
///
/// # Returns
/// The connection in the form of a receiver and sender pair.
pub fn channel<R, W>(rx: R, tx: W) -> (HttpReceiver<R>, HttpSender<W>)
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    (HttpReceiver::new(rx), HttpSender::new(tx))
}
