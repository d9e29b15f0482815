//! HTTP surface of the lost & found service.
//!
//! JSON in, JSON out. Session state travels in an HttpOnly cookie;
//! everything else is stateless on top of the flat-file store.

pub mod admin;
pub mod auth;
pub mod browse;
pub mod error;
pub mod extract;
pub mod items;

use crate::core::state::SharedState;
use anyhow::Result;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use colored::*;
use tower_http::cors::{Any, CorsLayer};

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "lostfound",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Build the API router
pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/signup", post(auth::signup))
        .route("/api/login", post(auth::login))
        .route("/api/admin/login", post(auth::admin_login))
        .route("/api/logout", post(auth::logout))
        .route("/api/items", get(browse::browse_items))
        .route("/api/search", get(browse::search_items))
        .route("/api/items/lost", post(items::report_lost))
        .route("/api/items/found", post(items::report_found))
        .route("/api/dashboard", get(items::dashboard))
        .route("/api/admin/dashboard", get(admin::admin_dashboard))
        .route("/api/admin/items/{id}/approve", post(admin::approve_item))
        .route("/api/admin/items/{id}/reject", post(admin::reject_item))
        .route("/api/admin/items/{id}", delete(admin::delete_item))
        .route("/api/statistics", get(admin::statistics))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn start_server(state: SharedState) -> Result<()> {
    let addr = format!("{}:{}", state.config.bind_addr, state.config.port);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    println!(
        "{} Lost & Found API listening on http://{}",
        "🌐".green(),
        addr
    );

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{AppConfig, AppState};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app(name: &str) -> Router {
        let dir = std::env::temp_dir().join(format!("lostfound_api_{}", name));
        if dir.exists() {
            std::fs::remove_dir_all(&dir).expect("clean temp dir");
        }
        let config = AppConfig {
            data_dir: dir.to_string_lossy().to_string(),
            ..AppConfig::default()
        };
        build_router(AppState::new(config).expect("state"))
    }

    /// Drive one request through the router; returns status, parsed
    /// body and the session cookie from Set-Cookie, if any.
    async fn call(
        app: &Router,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value, Option<String>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, c);
        }
        let request = match body {
            Some(v) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|s| s.to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value, set_cookie)
    }

    async fn login_user(app: &Router, username: &str) -> String {
        let signup = json!({
            "username": username,
            "password": "pw",
            "confirm_password": "pw"
        });
        let (status, _, _) = call(app, "POST", "/api/signup", None, Some(signup)).await;
        assert_eq!(status, StatusCode::OK);
        let login = json!({ "username": username, "password": "pw" });
        let (status, _, cookie) = call(app, "POST", "/api/login", None, Some(login)).await;
        assert_eq!(status, StatusCode::OK);
        cookie.expect("session cookie")
    }

    async fn login_admin(app: &Router) -> String {
        let login = json!({ "username": "admin", "password": "admin123" });
        let (status, _, cookie) = call(app, "POST", "/api/admin/login", None, Some(login)).await;
        assert_eq!(status, StatusCode::OK);
        cookie.expect("session cookie")
    }

    fn lost_wallet() -> Value {
        json!({
            "name": "Wallet",
            "color": "brown",
            "location": "cafeteria",
            "description": "leather, worn corners",
            "category": "accessories"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app("health");
        let (status, body, _) = call(&app, "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "lostfound");
    }

    #[tokio::test]
    async fn test_signup_rejects_mismatch_and_duplicates() {
        let app = test_app("signup");

        let bad = json!({ "username": "rana", "password": "a", "confirm_password": "b" });
        let (status, body, _) = call(&app, "POST", "/api/signup", None, Some(bad)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Passwords do not match");

        let ok = json!({ "username": "rana", "password": "a", "confirm_password": "a" });
        let (status, _, _) = call(&app, "POST", "/api/signup", None, Some(ok.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body, _) = call(&app, "POST", "/api/signup", None, Some(ok)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Username already exists");
    }

    #[tokio::test]
    async fn test_login_guards() {
        let app = test_app("login_guards");

        // Reporting without a session is rejected
        let (status, _, _) =
            call(&app, "POST", "/api/items/lost", None, Some(lost_wallet())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // Wrong password
        let signup = json!({ "username": "rana", "password": "pw", "confirm_password": "pw" });
        call(&app, "POST", "/api/signup", None, Some(signup)).await;
        let bad = json!({ "username": "rana", "password": "nope" });
        let (status, _, cookie) = call(&app, "POST", "/api/login", None, Some(bad)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(cookie.is_none());
    }

    #[tokio::test]
    async fn test_report_approve_browse_lifecycle() {
        let app = test_app("lifecycle");
        let user = login_user(&app, "rana").await;

        // Report a lost item
        let (status, body, _) = call(
            &app,
            "POST",
            "/api/items/lost",
            Some(&user),
            Some(lost_wallet()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["item"]["status"], "pending");
        let id = body["item"]["id"].as_u64().expect("item id");

        // Not browsable while pending
        let (_, body, _) = call(&app, "GET", "/api/items", None, None).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 0);

        // Admin sees it pending and approves
        let admin = login_admin(&app).await;
        let (status, body, _) =
            call(&app, "GET", "/api/admin/dashboard", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pending"].as_array().unwrap().len(), 1);
        assert_eq!(body["stats"]["total"], 1);

        let uri = format!("/api/admin/items/{}/approve", id);
        let (status, _, _) = call(&app, "POST", &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);

        // Now public
        let (_, body, _) = call(&app, "GET", "/api/items", None, None).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["items"][0]["status"], "approved");
        assert_eq!(body["categories"], json!(["accessories"]));

        // A found report by someone else turns up the approved match
        let other = login_user(&app, "omar").await;
        let found = json!({
            "name": "brown wallet",
            "color": "brown",
            "location": "near cafeteria",
            "description": "worn leather"
        });
        let (status, body, _) =
            call(&app, "POST", "/api/items/found", Some(&other), Some(found)).await;
        assert_eq!(status, StatusCode::OK);
        let matches = body["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["id"].as_u64(), Some(id));
        assert!(matches[0]["match_score"].as_f64().unwrap() > 0.0);

        // The reporter's dashboard carries the suggestion once approved
        let found_id = body["item"]["id"].as_u64().unwrap();
        let uri = format!("/api/admin/items/{}/approve", found_id);
        call(&app, "POST", &uri, Some(&admin), None).await;
        let (_, body, _) = call(&app, "GET", "/api/dashboard", Some(&other), None).await;
        assert_eq!(body["username"], "omar");
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["matches"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_admin_reject_and_delete() {
        let app = test_app("reject_delete");
        let user = login_user(&app, "rana").await;
        let (_, body, _) = call(
            &app,
            "POST",
            "/api/items/lost",
            Some(&user),
            Some(lost_wallet()),
        )
        .await;
        let id = body["item"]["id"].as_u64().unwrap();

        let admin = login_admin(&app).await;
        let uri = format!("/api/admin/items/{}/reject", id);
        let (status, _, _) = call(&app, "POST", &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body, _) = call(&app, "GET", "/api/statistics", Some(&admin), None).await;
        assert_eq!(body["rejected"], 1);

        let uri = format!("/api/admin/items/{}", id);
        let (status, _, _) = call(&app, "DELETE", &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);

        // Gone now
        let (status, _, _) = call(&app, "DELETE", &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_user_session_is_not_admin() {
        let app = test_app("role_guard");
        let user = login_user(&app, "rana").await;
        let (status, _, _) = call(&app, "GET", "/api/statistics", Some(&user), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let app = test_app("logout");
        let user = login_user(&app, "rana").await;
        let (status, _, _) = call(&app, "GET", "/api/dashboard", Some(&user), None).await;
        assert_eq!(status, StatusCode::OK);

        call(&app, "POST", "/api/logout", Some(&user), None).await;
        let (status, _, _) = call(&app, "GET", "/api/dashboard", Some(&user), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
