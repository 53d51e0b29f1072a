use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};

use std::sync::Arc;

use crate::currencies;
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    /// Page size used by the listing endpoint when the request has none.
    pub page_size: u64,
}

/// Build the application router.
///
/// The catalog is a public resource, so CORS is open to any origin.
pub fn router(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/currencies",
            get(currencies::list).post(currencies::create),
        )
        .route(
            "/currencies/{code}",
            get(currencies::get_by_code)
                .patch(currencies::update_by_code)
                .put(currencies::update_by_code)
                .delete(currencies::delete_by_code),
        )
        .layer(cors)
        .with_state(state)
}

pub async fn run(engine: Engine, page_size: u64) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, page_size, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    page_size: u64,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        page_size,
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    page_size: u64,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, page_size, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
