//! Listener setup and serve loop.

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::routes::router;
use bookshelf_core::CatalogStore;
use log::{info, warn};
use std::future::Future;

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: &ServerConfig, store: CatalogStore) -> Result<(), ServerError> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!("event=server_start module=http status=ok addr={addr}");
    println!("Listening on http://{addr} (Ctrl-C to stop)");

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await
        .map_err(ServerError::Serve)?;

    info!("event=server_stop module=http status=ok");
    Ok(())
}

// Resolves when `signal` fires. A handler that cannot be installed never
// resolves, so the server keeps running instead of stopping at startup.
async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(err) = signal.await {
        warn!("event=server_stop module=http status=error error_code=signal_failed error={err}");
        std::future::pending::<()>().await;
    }
}
