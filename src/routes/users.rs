use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::user_dto::{UpdateUserPayload, UserInfoResponse},
    error::{Error, Result},
    middleware::auth::AuthUser,
    models::role::Role,
    AppState,
};

pub async fn user_info(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_service
        .find_by_id(auth.id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
    let jobs = state.user_service.jobs_owned_by(auth.id).await?;

    let completed = user.profile_completion();
    let role = Role::from_id(user.role_id);
    Ok(Json(json!({
        "success": true,
        "data": UserInfoResponse { user, role, jobs, completed },
    })))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.update_profile(auth.id, payload).await?;
    let completed = user.profile_completion();
    let role = Role::from_id(user.role_id);
    Ok(Json(json!({
        "success": true,
        "message": "Profile updated",
        "data": UserInfoResponse { user, jobs: Vec::new(), role, completed },
    })))
}
