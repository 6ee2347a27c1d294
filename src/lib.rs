pub mod config;
pub mod credentials;
pub mod error;
pub mod gate;
pub mod gemini;
pub mod normalize;
pub mod prompts;
pub mod request;
pub mod server;
pub mod service;
pub mod trace;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

use config::AppConfig;
use credentials::CredentialStore;
use gemini::Gemini;
use server::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use trace::init_tracing;
use tracing::{error, info, warn};

pub async fn run() -> Result<(), BoxError> {
    init_tracing();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            return Err(Box::new(e) as BoxError);
        }
    };

    if cfg.api_key.is_empty() {
        warn!("GEMINI_API_KEY not set; only user-supplied keys will be used");
    }
    info!("Using upstream {}", cfg.base_url);

    let store = CredentialStore::new(cfg.api_key.clone());
    let state = Arc::new(AppState::new(store, Gemini::new(cfg.base_url.clone())));
    let app = server::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    let shutdown_signal = async {
        let ctrl = signal::ctrl_c();
        #[cfg(unix)]
        {
            let mut term_stream =
                match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                    Ok(s) => s,
                    Err(err) => {
                        error!("Failed to register SIGTERM handler: {}", err);
                        let _ = ctrl.await;
                        return;
                    }
                };

            tokio::select! {
                _ = ctrl => {},
                _ = term_stream.recv() => {},
            }
        }
        #[cfg(not(unix))]
        {
            let _ = ctrl.await;
        }
        info!("Shutdown signal received (SIGINT/SIGTERM). Stopping server.");
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
    {
        error!("Axum server error: {}", e);
        return Err(Box::new(e) as BoxError);
    }

    info!("Server shutdown complete.");
    Ok(())
}
