use std::{env, io, path::PathBuf, sync::Arc};

use log::{debug, error, info, warn};
use tokio::{net::TcpListener, signal, task::JoinSet};

use server::{App, conn};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "8000";
const DEFAULT_MODEL_PATH: &str = "model.json";

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let model_path = PathBuf::from(
        env::var("MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string()),
    );

    // The model must be loaded before the listener exists; there is no
    // serving state without it.
    let model = match regression::artifact::load(&model_path) {
        Ok(model) => model,
        Err(e) => {
            error!("cannot load model artifact from {}: {e}", model_path.display());
            return Err(e.into());
        }
    };

    info!(
        "model loaded from {}: {} features",
        model_path.display(),
        model.num_features()
    );

    let app = App::new(Arc::new(model));

    let addr = format!(
        "{}:{}",
        env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
        env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string()),
    );

    let listener = TcpListener::bind(&addr).await?;
    info!("listening at {addr}");

    let mut tasks = JoinSet::new();

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = accepted?;
                debug!("connection from {peer}");

                let app = app.clone();
                tasks.spawn(async move {
                    let (rx, tx) = stream.into_split();
                    if let Err(e) = conn::serve(app, rx, tx).await {
                        warn!("connection from {peer} failed: {e}");
                    }
                });
            }
            _ = signal::ctrl_c() => {
                info!("received SIGTERM, shutting down");
                break;
            }
        }
    }

    tasks.shutdown().await;
    Ok(())
}
