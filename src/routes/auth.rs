use axum::{
    extract::{Path, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse, Json},
    Extension,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::auth_dto::{AuthUserResponse, LoginPayload, RegisterPayload, VerifyOtpPayload},
    error::{Error, Result},
    middleware::auth::AuthUser,
    models::security_log::Severity,
    utils::{crypto, token},
    AppState,
};

fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
}

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "User created, verification code emailed"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    if state.user_service.find_by_email(&payload.email).await?.is_some() {
        return Err(Error::Conflict("User already exists".to_string()));
    }

    let password_hash = crypto::hash_password(&payload.password)
        .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;

    let user = state
        .user_service
        .create_user(&payload.name, &payload.email, &password_hash, payload.role)
        .await?;

    // OTP storage and dispatch come after the insert; if either fails the
    // fresh user row is rolled back so registration can be retried.
    let outcome = async {
        let code = state.otp_service.issue(user.id).await?;
        state.mail_service.send_otp(&user.email, &user.name, &code).await
    }
    .await;

    if let Err(err) = outcome {
        tracing::error!(error = ?err, user_id = %user.id, "registration rollback");
        state.user_service.delete_user(user.id).await?;
        return Err(Error::Internal(
            "Failed to send verification code, please try again".to_string(),
        ));
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully, verification code sent",
            "user": AuthUserResponse::from(&user),
        })),
    ))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login successful, token cookies set"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Email not verified")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let ip = client_ip(&headers);

    let Some(user) = state.user_service.find_by_email(&payload.email).await? else {
        state
            .security_log_service
            .log(
                None,
                "login_failed",
                Severity::Medium,
                Some(&format!("unknown email: {}", payload.email)),
                ip,
            )
            .await?;
        return Err(Error::Unauthorized("Invalid credentials".to_string()));
    };

    if !user.is_verified {
        return Err(Error::Forbidden(
            "Please verify your email before logging in".to_string(),
        ));
    }

    let password_ok = crypto::verify_password(&payload.password, &user.password_hash)
        .map_err(|e| Error::Internal(format!("Password verification failed: {}", e)))?;
    if !password_ok {
        state
            .security_log_service
            .log(
                Some(user.id),
                "login_failed",
                Severity::High,
                Some("password mismatch"),
                ip,
            )
            .await?;
        return Err(Error::Unauthorized("Invalid credentials".to_string()));
    }

    state.user_service.set_active(user.id, true).await?;
    state
        .security_log_service
        .log(Some(user.id), "login_success", Severity::Low, None, ip)
        .await?;

    let config = crate::config::get_config();
    let pair = token::issue_token_pair(
        user.id,
        &config.access_token_secret,
        &config.refresh_token_secret,
    )?;
    let [access, refresh] = token::auth_cookies(&pair, config.is_production());

    Ok((
        AppendHeaders([(SET_COOKIE, access), (SET_COOKIE, refresh)]),
        Json(json!({
            "message": "Login successful",
            "user": AuthUserResponse::from(&user),
        })),
    ))
}

pub async fn logout() -> Result<impl IntoResponse> {
    let config = crate::config::get_config();
    let [access, refresh] = token::clear_cookies(config.is_production());
    Ok((
        AppendHeaders([(SET_COOKIE, access), (SET_COOKIE, refresh)]),
        Json(json!({ "message": "User logged out successfully" })),
    ))
}

#[utoipa::path(
    post,
    path = "/auth/verifyOtp/{user_id}",
    request_body = VerifyOtpPayload,
    responses(
        (status = 200, description = "Email verified"),
        (status = 401, description = "Invalid or expired code")
    )
)]
pub async fn verify_otp(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<VerifyOtpPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let ok = state.otp_service.verify(user_id, &payload.code).await?;
    if !ok {
        return Err(Error::Unauthorized("Invalid or expired code".to_string()));
    }
    state.user_service.mark_verified(user_id).await?;

    Ok(Json(json!({ "message": "Email verified successfully" })))
}

pub async fn resend_otp(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_service
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
    if user.is_verified {
        return Err(Error::Conflict("User is already verified".to_string()));
    }

    let code = state.otp_service.issue(user.id).await?;
    state.mail_service.send_otp(&user.email, &user.name, &code).await?;

    Ok(Json(json!({ "message": "Verification code sent" })))
}

/// Confirms the token attached by the gate still resolves to a user.
pub async fn verify_session(Extension(auth): Extension<AuthUser>) -> Result<impl IntoResponse> {
    Ok(Json(json!({ "message": "Authenticated", "user": auth })))
}
