use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateInterviewPayload {
    pub application_id: Uuid,
    #[validate(length(min = 1))]
    pub mode: String,
    /// RFC 3339; re-validated server side.
    #[validate(length(min = 1))]
    pub scheduled_at: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateInterviewPayload {
    pub interview_id: Uuid,
    pub mode: Option<String>,
    pub scheduled_at: Option<String>,
    pub notes: Option<String>,
}
