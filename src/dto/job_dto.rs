use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::job::Job;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub company: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience_level: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationListQuery {
    pub status: Option<String>,
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateApplicationStatusPayload {
    #[validate(length(min = 1))]
    pub status: String,
}

/// Condensed job shape embedded into the matching prompt.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub skills: Vec<String>,
    pub experience_level: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
    pub posted_at: DateTime<Utc>,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        Self {
            job_id: job.id.to_string(),
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            skills: job.skills.clone(),
            experience_level: job.experience_level.clone(),
            salary_range: job.salary_range.clone(),
            job_type: job.job_type.clone(),
            posted_at: job.posted_at,
        }
    }
}

/// Profile shape embedded into the matching prompt.
#[derive(Debug, Clone, Serialize)]
pub struct MatchProfile {
    pub name: String,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_text: Option<String>,
}

/// One entry of the model's match reply. Unknown fields are rejected so a
/// drifting reply shape fails closed instead of being half-read.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobMatchReply {
    pub job_id: String,
    pub match_percentage: i32,
    pub reason: String,
    #[serde(default)]
    pub summary_analysis: Option<String>,
}

/// Stored job joined with its match score, the client-facing shape.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendedJob {
    pub job_id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub match_percentage: i32,
    pub reason: String,
    pub skills: Vec<String>,
    pub experience_level: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
    pub posted_at: DateTime<Utc>,
}
