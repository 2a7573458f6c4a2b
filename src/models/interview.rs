use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Interview {
    pub id: Uuid,
    pub application_id: Uuid,
    pub job_id: Uuid,
    pub recruiter_id: Uuid,
    pub mode: String,
    pub scheduled_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Interview joined with job and candidate, used by both recruiter and
/// applicant read paths.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewDetails {
    pub id: Uuid,
    pub application_id: Uuid,
    pub mode: String,
    pub scheduled_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub status: String,
    pub job_title: String,
    pub company: String,
    pub candidate_name: String,
}

pub const STATUS_SCHEDULED: &str = "scheduled";
pub const STATUS_CANCELLED: &str = "cancelled";
