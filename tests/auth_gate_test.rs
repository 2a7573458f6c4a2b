use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use uuid::Uuid;

use jobmatch_backend::middleware::auth::{require_employer, require_job_seeker, AuthUser};
use jobmatch_backend::models::role::Role;
use jobmatch_backend::utils::token;

fn test_user(role: Role) -> AuthUser {
    AuthUser {
        id: Uuid::new_v4(),
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        role,
        avatar: None,
        cv_url: None,
    }
}

/// Stands in for the authorization gate: attaches a fixed identity so the
/// role guards can be exercised without a database.
async fn attach_user(role: Role, mut req: Request<Body>, next: Next) -> Response {
    req.extensions_mut().insert(test_user(role));
    next.run(req).await
}

fn guarded_app(role: Option<Role>) -> Router {
    let mut app = Router::new()
        .route(
            "/employer-only",
            get(|| async { "ok" }).route_layer(middleware::from_fn(require_employer)),
        )
        .route(
            "/seeker-only",
            get(|| async { "ok" }).route_layer(middleware::from_fn(require_job_seeker)),
        );
    if let Some(role) = role {
        app = app.layer(middleware::from_fn(move |req, next| {
            attach_user(role, req, next)
        }));
    }
    app
}

#[tokio::test]
async fn role_guards_enforce_the_caller_role() {
    let app = guarded_app(Some(Role::Employer));

    let res = app
        .clone()
        .oneshot(Request::get("/employer-only").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .oneshot(Request::get("/seeker-only").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unauthenticated_requests_are_rejected() {
    let app = guarded_app(None);

    let res = app
        .oneshot(Request::get("/employer-only").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json: JsonValue = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn issued_tokens_verify_and_expire_by_secret() {
    let user_id = Uuid::new_v4();
    let pair = token::issue_token_pair(user_id, "access", "refresh").unwrap();

    assert_eq!(token::verify_token(&pair.access_token, "access").unwrap(), user_id);
    assert!(token::verify_token(&pair.access_token, "refresh").is_err());

    let [access, refresh] = token::auth_cookies(&pair, false);
    assert!(access.starts_with("access_token="));
    assert!(refresh.contains("Max-Age=2592000"));
}
