use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::listingdb::LocationExt,
    dtos::{
        locationdtos::{LocationDto, LocationListDto},
        querydtos::RequestQueryDto,
    },
    error::HttpError,
    service::error::ServiceError,
    AppState,
};

pub fn locations_handler() -> Router {
    Router::new()
        .route("/", get(get_locations))
        .route("/:location_id", get(get_location))
}

pub async fn get_locations(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query_params): Query<RequestQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| ServiceError::Validation(e.to_string()))?;

    let skip = query_params.skip();
    let limit = query_params.limit();

    let locations = app_state
        .db_client
        .get_locations(skip, limit)
        .await
        .map_err(ServiceError::from)?;

    let total = app_state
        .db_client
        .get_location_count()
        .await
        .map_err(ServiceError::from)?;

    Ok(Json(LocationListDto {
        locations: locations.iter().map(LocationDto::from_location).collect(),
        total,
        skip,
        limit,
    }))
}

pub async fn get_location(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(location_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let location = app_state
        .db_client
        .get_location(location_id)
        .await
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::LocationNotFound(location_id))?;

    Ok(Json(LocationDto::from_location(&location)))
}
