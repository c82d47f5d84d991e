//! Router assembly and serving

use anyhow::Result;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    authentication, author_collections, author_courses, authors, courses, root,
};
use super::state::AppState;

/// Build the full application router
///
/// Every route under `/api` except `/api/authentication` demands a
/// bearer token through the `CurrentUser` extractor on its handler. The
/// health probes sit outside `/api` and are always open.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/api", get(root::get_root))
        .route("/api/authentication", post(authentication::authenticate))
        .route("/api/authors", post(authors::add_author))
        .route(
            "/api/authors/{author_id}",
            get(authors::get_author)
                .patch(authors::update_author)
                .delete(authors::delete_author),
        )
        .route(
            "/api/authorcollections",
            post(author_collections::add_author_collection),
        )
        .route(
            "/api/authorcollections/{ids}",
            get(author_collections::get_author_collection),
        )
        .route(
            "/api/authors/{author_id}/courses",
            get(author_courses::get_courses_for_author)
                .post(author_courses::create_course_for_author),
        )
        .route(
            "/api/authors/{author_id}/courses/{course_id}",
            get(author_courses::get_course_for_author)
                .put(author_courses::upsert_course)
                .patch(author_courses::update_course_for_author)
                .delete(author_courses::delete_course_for_author),
        )
        .route(
            "/api/courses/{course_id}",
            get(courses::get_course).patch(courses::update_course),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint handler
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "course-library"
    }))
}

/// Bind `addr` and serve the API with graceful shutdown
///
/// This will:
/// - Bind to the provided address
/// - Start serving requests
/// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let app = build_router(state);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
