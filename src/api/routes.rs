use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health_check))
        // Wardrobe
        .route(
            "/wardrobe/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route(
            "/wardrobe/items/:id",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        // Recommendations
        .route("/recommendations", post(handlers::recommend))
        .route(
            "/recommendations/history",
            get(handlers::recommendation_history),
        )
        // Feedback
        .route(
            "/feedback",
            post(handlers::create_feedback).get(handlers::list_feedback),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
