use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub skills: Vec<String>,
    pub experience_level: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
    pub posted_at: DateTime<Utc>,
}
