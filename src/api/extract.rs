//! Session cookie plumbing: parse the token out of request headers and
//! reject requests that lack the right role.

use super::error::ApiError;
use crate::core::state::SharedState;
use crate::session::Role;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

pub const SESSION_COOKIE: &str = "session";

/// Pull the session token out of the `Cookie` header, if any.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn session_cookie(token: &str, max_age_seconds: i64) -> String {
    format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}",
        SESSION_COOKIE, token, max_age_seconds
    )
}

pub fn clear_session_cookie() -> String {
    format!("{}=; HttpOnly; Path=/; Max-Age=0", SESSION_COOKIE)
}

/// A live user session. Admin sessions do not pass this guard.
pub struct CurrentUser {
    pub username: String,
}

/// A live admin session.
pub struct CurrentAdmin {
    pub username: String,
}

async fn resolve(parts: &Parts, state: &SharedState) -> Result<(String, crate::session::Session), ApiError> {
    let token = session_token(&parts.headers)
        .ok_or_else(|| ApiError::Unauthorized("Login required".to_string()))?;
    let session = state
        .sessions
        .get(&token)
        .await
        .ok_or_else(|| ApiError::Unauthorized("Session expired, please log in again".to_string()))?;
    Ok((token, session))
}

impl FromRequestParts<SharedState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let (_, session) = resolve(parts, state).await?;
        if session.role != Role::User {
            return Err(ApiError::Forbidden("User account required".to_string()));
        }
        Ok(Self {
            username: session.username,
        })
    }
}

impl FromRequestParts<SharedState> for CurrentAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let (_, session) = resolve(parts, state).await?;
        if session.role != Role::Admin {
            return Err(ApiError::Forbidden("Admin access required".to_string()));
        }
        Ok(Self {
            username: session.username,
        })
    }
}
