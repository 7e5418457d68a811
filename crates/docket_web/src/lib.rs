use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    Router::new()
        .route(
            "/api/contents",
            get(handlers::list_contents)
                .post(handlers::create_content)
                .put(handlers::update_content)
                .delete(handlers::delete_content),
        )
        .route("/api/contents/upcoming", get(handlers::upcoming_contents))
        .route("/api/contents/archive", get(handlers::archive_contents))
        .route("/api/contents/types", get(handlers::content_types))
        .layer(layers)
        .with_state(Arc::new(state))
}

/// Serve the API until the process is stopped.
pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use docket_core::{ContentRecord, Error, Result};
    pub use crate::{ApiError, AppState};
}
