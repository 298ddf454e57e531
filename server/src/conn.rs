use std::io;

use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::App;
use crate::app::json;
use crate::schema::ErrorBody;

/// Serves requests on one connection until the peer closes it or asks to.
///
/// Requests are handled sequentially in arrival order; concurrency comes
/// from the accept loop spawning one of these per connection.
///
/// # Args
/// * `app` - The shared application context.
/// * `rx` - Read half of the connection.
/// * `tx` - Write half of the connection.
///
/// # Errors
/// Returns `io::Error` if the transport fails mid-exchange.
pub async fn serve<R, W>(app: App, rx: R, tx: W) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (mut rx, mut tx) = httpcomms::channel(rx, tx);

    loop {
        let req = match rx.recv().await {
            Ok(Some(req)) => req,
            Ok(None) => break,
            Err(e) => {
                // After a framing violation the stream position is
                // unreliable, so answer if possible and hang up.
                let Some(status) = e.status() else {
                    return Err(e.into());
                };

                warn!("malformed request: {e}");
                let body = ErrorBody {
                    detail: e.to_string(),
                };
                let resp = json(status, &body).with_header("connection", "close");
                tx.send(&resp).await?;
                break;
            }
        };

        let keep_alive = req.keep_alive();
        let resp = app.handle(&req);
        debug!(
            "{} {} -> {}",
            req.method().as_str(),
            req.target(),
            resp.status().code()
        );

        tx.send(&resp).await?;

        if !keep_alive {
            break;
        }
    }

    Ok(())
}
