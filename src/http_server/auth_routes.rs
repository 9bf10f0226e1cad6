//! Auth HTTP Routes
//!
//! Registration and login. Both return the caller's single API token.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::post,
    Router,
};

use crate::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::store::User;

use super::errors::ApiResult;
use super::state::AppState;

/// Auth routes with shared state
pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/register/", post(register_handler))
        .route("/register", post(register_handler))
        .route("/login/", post(login_handler))
        .route("/login", post(login_handler))
        .with_state(state)
}

/// Resolve the `Authorization` header to an active user
pub(super) async fn authenticated_user(state: &AppState, headers: &HeaderMap) -> ApiResult<User> {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    Ok(state.auth.authenticate(header).await?)
}

async fn register_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let Json(request) = payload?;
    let response = state.auth.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(request) = payload?;
    let response = state.auth.login(request).await?;
    Ok(Json(response))
}
