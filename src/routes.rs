// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{comment, render},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Comment routes store raw text and render on read.
/// * `/api/render` previews the pipeline without storing anything.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let post_routes = Router::new().route(
        "/{post_id}/comments",
        get(comment::list_comments).post(comment::create_comment),
    );

    let comment_routes = Router::new().route("/{id}", get(comment::get_comment));

    Router::new()
        .route("/api/health", get(render::health))
        .route("/api/render", post(render::render_preview))
        .nest("/api/posts", post_routes)
        .nest("/api/comments", comment_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
