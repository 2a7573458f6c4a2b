use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub status: String,
    pub applied_at: DateTime<Utc>,
}

/// Application row joined with its job, the seeker-facing read shape.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationWithJob {
    pub id: Uuid,
    pub job_id: Uuid,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: Option<String>,
}

/// Application row joined with the applicant, the recruiter-facing read shape.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationWithApplicant {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_skills: Option<Vec<String>>,
    pub cv_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ApplicationStatus::Pending),
            "reviewed" => Some(ApplicationStatus::Reviewed),
            "accepted" => Some(ApplicationStatus::Accepted),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    /// `pending` is set at creation only; recruiters may only move an
    /// application to one of the other three states.
    pub fn parse_update(value: &str) -> Option<Self> {
        match Self::parse(value) {
            Some(ApplicationStatus::Pending) | None => None,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_not_a_valid_manual_update() {
        assert_eq!(ApplicationStatus::parse_update("pending"), None);
        assert_eq!(ApplicationStatus::parse_update("archived"), None);
        assert_eq!(
            ApplicationStatus::parse_update("accepted"),
            Some(ApplicationStatus::Accepted)
        );
    }
}
