//! HTTP API surface for DoYourTasks.
//!
//! # Responsibility
//! - Expose the note CRUD operations and the auth forwarding routes over
//!   HTTP, mapping each request onto one adapter call.
//!
//! # Invariants
//! - Handlers are stateless request/response exchanges; no server-side
//!   mutable state exists outside the external backend.
//! - Store failures map to 502, validation failures to 400, auth
//!   rejections to 401 (uniform policy, see DESIGN.md).

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use log::info;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;

use doyourtasks_core::Config;

pub mod error;
pub mod routes;
pub mod state;

pub use state::AppState;

/// Builds the application router over the given adapters.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/tasks",
            get(routes::list_tasks)
                .post(routes::create_task)
                .delete(routes::delete_task),
        )
        .route("/api/auth/sign_in", post(routes::sign_in))
        .route("/api/auth/sign_up", post(routes::sign_up))
        .layer(cors_layer())
        .with_state(state)
}

/// Binds the listener and serves until a shutdown signal arrives.
pub async fn serve(config: &Config) -> std::io::Result<()> {
    let state = AppState::from_config(config);
    let app = app(state);

    let address = format!("0.0.0.0:{}", config.port);
    info!("event=server_start module=server status=start address={address}");

    let listener = TcpListener::bind(&address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("event=server_stop module=server status=start reason=ctrl_c");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("event=server_stop module=server status=start reason=terminate");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
