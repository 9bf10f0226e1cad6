//! Place HTTP Routes
//!
//! Add-review, search and place detail. Every route requires a token.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Json, Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};

use crate::places::{
    AddReviewRequest, CreatedReview, PlaceDetail, PlaceError, SearchParams, SearchQuery,
};
use crate::store::PlaceSummary;

use super::auth_routes::authenticated_user;
use super::errors::ApiResult;
use super::state::AppState;

/// Place routes with shared state
pub fn place_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/add-review/", post(add_review_handler))
        .route("/add-review", post(add_review_handler))
        .route("/places/", get(search_handler))
        .route("/places", get(search_handler))
        .route("/places/:id/", get(detail_handler))
        .route("/places/:id", get(detail_handler))
        .with_state(state)
}

async fn add_review_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<AddReviewRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedReview>)> {
    let user = authenticated_user(&state, &headers).await?;
    let Json(request) = payload?;

    let created = state.places.add_review(&user, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn search_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<Vec<PlaceSummary>>> {
    authenticated_user(&state, &headers).await?;
    let Query(pairs) = pairs?;
    let params: SearchParams = pairs.into_iter().collect();

    let results = state.places.search(&SearchQuery::from(params)).await?;
    Ok(Json(results))
}

async fn detail_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<PlaceDetail>> {
    let user = authenticated_user(&state, &headers).await?;

    // Non-numeric ids name no place
    let id: i64 = id.parse().map_err(|_| PlaceError::PlaceNotFound)?;

    let detail = state.places.detail(id, &user).await?;
    Ok(Json(detail))
}
