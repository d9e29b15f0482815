//! Signup, login and logout endpoints.

use super::error::ApiError;
use super::extract::{clear_session_cookie, session_cookie, session_token};
use crate::core::state::SharedState;
use crate::session::Role;
use crate::store::users::valid_username;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn signup(
    State(state): State<SharedState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !valid_username(&req.username) {
        return Err(ApiError::Invalid(
            "Username must be non-empty without spaces, ':' or '|'".to_string(),
        ));
    }
    if req.password.is_empty() {
        return Err(ApiError::Invalid("Password must not be empty".to_string()));
    }
    if req.password != req.confirm_password {
        return Err(ApiError::Invalid("Passwords do not match".to_string()));
    }

    let store = state.store.lock().await;
    if store.user_exists(&req.username)? {
        return Err(ApiError::Conflict("Username already exists".to_string()));
    }
    store.append_user(&req.username, &req.password)?;

    Ok(Json(json!({ "message": "Signup successful! Please login." })))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let ok = state
        .store
        .lock()
        .await
        .verify_user(&req.username, &req.password)?;
    if !ok {
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }
    start_session(&state, &req.username, Role::User).await
}

pub async fn admin_login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let ok = state
        .store
        .lock()
        .await
        .verify_admin(&req.username, &req.password)?;
    if !ok {
        return Err(ApiError::Unauthorized(
            "Invalid admin credentials".to_string(),
        ));
    }
    start_session(&state, &req.username, Role::Admin).await
}

async fn start_session(
    state: &SharedState,
    username: &str,
    role: Role,
) -> Result<impl IntoResponse, ApiError> {
    let token = state.sessions.create(username, role).await;
    let cookie = session_cookie(&token, state.sessions.ttl_seconds());
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(json!({ "username": username, "role": role })),
    ))
}

pub async fn logout(State(state): State<SharedState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        state.sessions.remove(&token).await;
    }
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Json(json!({ "message": "Logged out" })),
    )
}
