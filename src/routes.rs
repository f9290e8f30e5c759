// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::post,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers::compose, state::AppState};

/// Assembles the main application router.
///
/// * Mounts the compose transform routes.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (configuration).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(state.config.server_port))
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let compose_routes = Router::new()
        .route("/transform", post(compose::transform_json))
        .route("/transform/form", post(compose::transform_form));

    Router::new()
        .nest("/api/compose", compose_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Local origins served on the configured port.
fn allowed_origins(port: u16) -> Vec<HeaderValue> {
    ["localhost", "127.0.0.1"]
        .into_iter()
        .filter_map(|host| HeaderValue::from_str(&format!("http://{}:{}", host, port)).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins_follow_configured_port() {
        let origins = allowed_origins(8080);
        assert_eq!(
            origins,
            vec![
                HeaderValue::from_static("http://localhost:8080"),
                HeaderValue::from_static("http://127.0.0.1:8080"),
            ]
        );
    }
}
