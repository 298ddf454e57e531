//! The implementation of the sending end of the connection.

use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::response::Response;

/// The sending end handle of the connection.
pub struct HttpSender<W>
where
    W: AsyncWrite + Unpin,
{
    tx: W,
    buf: Vec<u8>,
}

impl<W: AsyncWrite + Unpin> HttpSender<W> {
    /// Creates a new `HttpSender` instance.
    ///
    /// # Arguments
    /// * `tx` - The underlying writer.
    pub(super) fn new(tx: W) -> Self {
        Self {
            tx,
            buf: Vec::new(),
        }
    }

    /// Encodes and writes `resp` through the inner sender.
    ///
    /// # Arguments
    /// * `resp` - The response to deliver.
    ///
    /// # Returns
    /// A result object that returns `io::Error` on failure.
    pub async fn send(&mut self, resp: &Response) -> io::Result<()> {
        let Self { buf, tx } = self;

        buf.clear();
        resp.encode(buf);

        tx.write_all(buf).await?;
        tx.flush().await
    }
}
