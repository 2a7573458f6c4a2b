use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::assistant_dto::{AskPayload, AssistantResponse},
    dto::interview_dto::{CreateInterviewPayload, UpdateInterviewPayload},
    dto::job_dto::{
        ApplicationListQuery, CreateJobPayload, JobSummary, MatchProfile,
        UpdateApplicationStatusPayload,
    },
    dto::user_dto::LearningPathPayload,
    error::{Error, Result},
    middleware::auth::AuthUser,
    models::application::ApplicationStatus,
    services::ai_service::AiService,
    utils::time,
    AppState,
};

/// AI-ranked job recommendations for the caller's profile.
pub async fn get_jobs(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_service
        .find_by_id(auth.id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    let jobs = state.job_service.list_all().await?;
    if jobs.is_empty() {
        return Ok(Json(json!({ "success": true, "count": 0, "data": [] })));
    }

    let profile = MatchProfile {
        name: user.name,
        bio: user.bio,
        skills: user.skills.unwrap_or_default(),
        experience: user.experience,
        location: user.location,
        cv_text: None,
    };
    let summaries: Vec<JobSummary> = jobs.iter().map(JobSummary::from).collect();

    let matches = state.ai_service.match_jobs(&profile, &summaries).await?;
    let recommended = AiService::join_matches(matches, &jobs);

    Ok(Json(json!({
        "success": true,
        "count": recommended.len(),
        "data": recommended,
    })))
}

#[utoipa::path(
    post,
    path = "/jobs/create",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created"),
        (status = 403, description = "Caller is not an employer")
    )
)]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.create(auth.id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Job created successfully",
            "data": job,
        })),
    ))
}

pub async fn recruiter_jobs(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list_by_owner(auth.id).await?;
    Ok(Json(json!({ "count": jobs.len(), "data": jobs })))
}

pub async fn apply_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    if auth.cv_url.is_none() {
        return Err(Error::BadRequest(
            "Please upload your CV before applying".to_string(),
        ));
    }

    let application = state.job_service.apply(auth.id, job_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Application submitted successfully",
            "application": application,
        })),
    ))
}

pub async fn get_user_applications(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    if let Some(status) = &query.status {
        if ApplicationStatus::parse(status).is_none() {
            return Err(Error::BadRequest(format!("Unknown status: {}", status)));
        }
    }

    let applications = state.job_service.list_for_applicant(auth.id, &query).await?;
    Ok(Json(json!({
        "message": "User applications retrieved successfully",
        "count": applications.len(),
        "applications": applications,
    })))
}

pub async fn job_applicants(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let applicants = state.job_service.list_applicants(job_id, auth.id).await?;
    Ok(Json(json!({ "count": applicants.len(), "applicants": applicants })))
}

#[utoipa::path(
    patch,
    path = "/jobs/{application_id}/status",
    request_body = UpdateApplicationStatusPayload,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Invalid status value"),
        (status = 403, description = "Caller does not own the job")
    )
)]
pub async fn update_application_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(application_id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationStatusPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let status = ApplicationStatus::parse_update(&payload.status)
        .ok_or_else(|| Error::BadRequest(format!("Invalid status value: {}", payload.status)))?;

    let application = state
        .job_service
        .update_status(application_id, auth.id, status)
        .await?;
    Ok(Json(json!({
        "message": "Application status updated",
        "application": application,
    })))
}

pub async fn delete_application(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(application_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state
        .job_service
        .delete_application(application_id, auth.id)
        .await?;
    Ok(Json(json!({ "message": "Application deleted" })))
}

#[utoipa::path(
    post,
    path = "/jobs/createInterview",
    request_body = CreateInterviewPayload,
    responses(
        (status = 201, description = "Interview scheduled"),
        (status = 400, description = "Missing fields or unparseable date"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn create_interview(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateInterviewPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let scheduled_at = time::from_rfc3339(&payload.scheduled_at)
        .map_err(|_| Error::BadRequest("Invalid date format, expected RFC 3339".to_string()))?;

    let interview = state
        .interview_service
        .schedule(
            auth.id,
            payload.application_id,
            &payload.mode,
            scheduled_at,
            payload.notes.as_deref(),
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Interview scheduled",
            "interview": interview,
        })),
    ))
}

pub async fn upcoming_interviews(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let interviews = state.interview_service.upcoming_for_recruiter(auth.id).await?;
    Ok(Json(json!({ "count": interviews.len(), "interviews": interviews })))
}

pub async fn my_interviews(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let interviews = state.interview_service.list_for_applicant(auth.id).await?;
    Ok(Json(json!({ "count": interviews.len(), "interviews": interviews })))
}

pub async fn update_interview(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<UpdateInterviewPayload>,
) -> Result<impl IntoResponse> {
    let scheduled_at = match &payload.scheduled_at {
        Some(raw) => Some(
            time::from_rfc3339(raw)
                .map_err(|_| Error::BadRequest("Invalid date format, expected RFC 3339".to_string()))?,
        ),
        None => None,
    };

    let interview = state
        .interview_service
        .update(auth.id, &payload, scheduled_at)
        .await?;
    Ok(Json(json!({
        "message": "Interview updated",
        "interview": interview,
    })))
}

pub async fn cancel_interview(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(interview_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let interview = state.interview_service.cancel(auth.id, interview_id).await?;
    Ok(Json(json!({
        "message": "Interview cancelled",
        "interview": interview,
    })))
}

/// Conversational assistant over the recruiter's own data. Screening and
/// validation failures keep their status codes; anything unexpected
/// degrades to a generic message instead of an error.
pub async fn ask_assistant(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<AskPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    match state.assistant_service.ask(&auth, payload).await {
        Ok(response) => Ok(Json(response)),
        Err(err @ (Error::Forbidden(_) | Error::BadRequest(_))) => Err(err),
        Err(err) => {
            tracing::error!(error = ?err, user_id = %auth.id, "assistant degraded");
            Ok(Json(AssistantResponse::message(
                "The assistant is temporarily unavailable. Please try again later.",
                Vec::new(),
            )))
        }
    }
}

pub async fn create_learning_path(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<LearningPathPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let path = state
        .ai_service
        .generate_learning_path(&payload.goal, &payload.skills, payload.study_hours)
        .await?;
    let value = serde_json::to_value(&path)?;
    state
        .user_service
        .set_learning_path(auth.id, Some(value.clone()))
        .await?;

    Ok(Json(value))
}

pub async fn get_learning_path(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_service
        .find_by_id(auth.id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
    let path = user
        .learning_path
        .ok_or_else(|| Error::NotFound("No learning path found".to_string()))?;
    Ok(Json(path))
}

pub async fn delete_learning_path(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    state.user_service.set_learning_path(auth.id, None).await?;
    Ok(Json(json!({ "message": "Learning path deleted" })))
}
