use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::models::role::Role;
use crate::models::user::User;
use crate::utils::token::{cookie_value, verify_token, ACCESS_COOKIE};
use crate::AppState;

/// Caller identity resolved by the authorization gate and attached to the
/// request for downstream handlers.
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub avatar: Option<String>,
    pub cv_url: Option<String>,
}

fn unauthorized(msg: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": msg }))).into_response()
}

fn forbidden() -> Response {
    (StatusCode::FORBIDDEN, Json(json!({ "error": "forbidden" }))).into_response()
}

/// Token from the `access_token` cookie, falling back to a bearer header.
fn extract_token(req: &Request) -> Option<String> {
    if let Some(cookies) = req
        .headers()
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = cookie_value(cookies, ACCESS_COOKIE) {
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }
    req.headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

/// Authorization gate: verifies the access token, loads the caller and
/// attaches an [`AuthUser`] extension. Rejects with 401 before any business
/// logic runs.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(token) = extract_token(&req) else {
        return unauthorized("Access denied: no token provided");
    };

    let config = crate::config::get_config();
    let user_id = match verify_token(&token, &config.access_token_secret) {
        Ok(id) => id,
        Err(_) => return unauthorized("Invalid or expired token"),
    };

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&state.pool)
        .await;

    let user = match user {
        Ok(Some(user)) => user,
        Ok(None) => return unauthorized("User not found"),
        Err(err) => {
            tracing::error!(error = ?err, "failed to load user for auth");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "An unexpected error occurred" })),
            )
                .into_response();
        }
    };

    let Some(role) = Role::from_id(user.role_id) else {
        return unauthorized("User has no valid role");
    };

    req.extensions_mut().insert(AuthUser {
        id: user.id,
        name: user.name,
        email: user.email,
        role,
        avatar: user.avatar,
        cv_url: user.cv_url,
    });
    next.run(req).await
}

fn role_of(req: &Request) -> Option<Role> {
    req.extensions().get::<AuthUser>().map(|u| u.role)
}

pub async fn require_job_seeker(req: Request, next: Next) -> Response {
    match role_of(&req) {
        Some(Role::JobSeeker) => next.run(req).await,
        Some(_) => forbidden(),
        None => unauthorized("Not authenticated"),
    }
}

pub async fn require_employer(req: Request, next: Next) -> Response {
    match role_of(&req) {
        Some(Role::Employer) => next.run(req).await,
        Some(_) => forbidden(),
        None => unauthorized("Not authenticated"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_headers(headers: &[(&str, &str)]) -> Request {
        let mut builder = axum::http::Request::builder().uri("/");
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn cookie_token_wins_over_bearer() {
        let req = request_with_headers(&[
            ("cookie", "access_token=from-cookie"),
            ("authorization", "Bearer from-header"),
        ]);
        assert_eq!(extract_token(&req).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn bearer_fallback_and_empty_cookie() {
        let req = request_with_headers(&[
            ("cookie", "access_token="),
            ("authorization", "Bearer from-header"),
        ]);
        assert_eq!(extract_token(&req).as_deref(), Some("from-header"));

        let req = request_with_headers(&[]);
        assert_eq!(extract_token(&req), None);
    }
}
