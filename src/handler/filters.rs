use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::filterdb::SavedFilterExt,
    dtos::{
        filterdtos::{
            FilterRequestDto, FilteredListingsDto, ListingDto, SaveFilterRequestDto,
            SavedFilterDto, SavedFilterListDto,
        },
        querydtos::{RequestQueryDto, SearchQueryDto},
    },
    error::HttpError,
    service::error::ServiceError,
    AppState,
};

pub fn filters_handler() -> Router {
    Router::new()
        .route("/", post(save_filter).get(get_saved_filters))
        .route("/search", post(search_listings))
        .route("/:filter_id", get(get_saved_filter))
}

pub async fn save_filter(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SaveFilterRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| ServiceError::Validation(e.to_string()))?;

    let saved = app_state
        .db_client
        .save_filter(&body.to_new_filter())
        .await
        .map_err(ServiceError::from)?;

    tracing::info!("Saved filter {} ({})", saved.filter_id, saved.name);

    Ok((
        StatusCode::CREATED,
        Json(SavedFilterDto::from_saved_filter(&saved)),
    ))
}

pub async fn get_saved_filters(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query_params): Query<RequestQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| ServiceError::Validation(e.to_string()))?;

    let filters = app_state
        .db_client
        .get_saved_filters(query_params.skip(), query_params.limit())
        .await
        .map_err(ServiceError::from)?;

    let total = app_state
        .db_client
        .get_saved_filter_count()
        .await
        .map_err(ServiceError::from)?;

    Ok(Json(SavedFilterListDto {
        filters: filters.iter().map(SavedFilterDto::from_saved_filter).collect(),
        total,
    }))
}

pub async fn get_saved_filter(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(filter_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let filter = app_state
        .db_client
        .get_saved_filter(filter_id)
        .await
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::SavedFilterNotFound(filter_id))?;

    Ok(Json(SavedFilterDto::from_saved_filter(&filter)))
}

pub async fn search_listings(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query_params): Query<SearchQueryDto>,
    Json(body): Json<FilterRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| ServiceError::Validation(e.to_string()))?;

    body.validate()
        .map_err(|e| ServiceError::Validation(e.to_string()))?;

    let result = app_state
        .search_service
        .search(&body.to_spec(), &query_params)
        .await?;

    Ok(Json(FilteredListingsDto {
        listings: result.listings.iter().map(ListingDto::from_row).collect(),
        total: result.total,
    }))
}
