//! Dealership inventory web service.
//!
//! One shared core — record store, filter engine, validation policy — behind
//! three thin HTTP front-ends:
//!
//! - **seller**: full add/edit/delete surface
//! - **customer**: read-only browsing with a detail view
//! - **gateway**: embeddable variant, writes gated behind an admin login
//!
//! The variant a process serves is picked by `APP_VARIANT`. All variants
//! share the same JSON-backed inventory file, loaded once at startup and
//! rewritten in full on every mutation.

use std::sync::Arc;

use axum::Router;
use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod error;
pub mod filter;
pub mod inventory;
pub mod routes;
pub mod session;
pub mod state;
pub mod validate;

use config::Variant;
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().expect("Inventory misconfigured!");

    info!("Starting server...");
    let app = router_for(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

/// Router for the configured front-end variant.
pub fn router_for(state: Arc<AppState>) -> Router {
    match state.config.variant {
        Variant::Seller => routes::seller_router(state),
        Variant::Customer => routes::customer_router(state),
        Variant::Gateway => routes::gateway_router(state),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
