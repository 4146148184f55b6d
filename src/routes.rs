// routes.rs
use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    error::{ErrorMessage, HttpError},
    handler::{filters::filters_handler, locations::locations_handler},
    AppState,
};

// Health check handler
async fn health_check(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state.db_client.ping().await.map_err(|e| {
        tracing::error!("Health check failed: {}", e);
        HttpError::service_unavailable(ErrorMessage::DatabaseUnavailable.to_string())
    })?;

    Ok(Json(json!({
        "status": "ok",
        "database": "connected"
    })))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/filters", filters_handler())
        .nest("/locations", locations_handler())
        .layer(TraceLayer::new_for_http());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
        .layer(Extension(app_state))
}
