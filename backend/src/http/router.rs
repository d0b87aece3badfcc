//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Request bodies are small JSON documents.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        // Itineraries
        .route(
            "/api/itineraries",
            get(handlers::list_itineraries).post(handlers::create_itinerary),
        )
        .route(
            "/api/itineraries/byUser",
            get(handlers::list_itineraries_by_user),
        )
        .route(
            "/api/itineraries/{itinerary_id}",
            get(handlers::get_itinerary).delete(handlers::delete_itinerary),
        )
        .route(
            "/api/itineraries/{itinerary_id}/days",
            get(handlers::get_itinerary_days),
        )
        .route(
            "/api/itineraries/{itinerary_id}/places",
            get(handlers::list_itinerary_places),
        )
        // Places
        .route("/api/places", get(handlers::list_places))
        .route("/api/places/{place_index}", delete(handlers::delete_place))
        .route("/api/places/getPlaceInfo", post(handlers::get_place_info))
        .route("/api/places/handlePlace", post(handlers::handle_place))
        .route("/api/places/addPlace", post(handlers::add_place))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::db::FullRepository;
    use crate::places::{GooglePlacesClient, PlacesClient, PlacesConfig};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> AppState {
        let repo = Arc::new(LocalRepository::new()) as Arc<dyn FullRepository>;
        let places = GooglePlacesClient::new(PlacesConfig::with_base_url("http://127.0.0.1:1", ""))
            .unwrap();
        AppState::new(repo, Arc::new(places) as Arc<dyn PlacesClient>)
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = create_router(state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = create_router(state())
            .oneshot(Request::get("/api/unknown").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
