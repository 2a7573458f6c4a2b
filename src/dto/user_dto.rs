use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::job::Job;
use crate::models::role::Role;
use crate::models::user::User;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserPayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<String>,
    pub location: Option<String>,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub summary: Option<String>,
    pub cv_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserInfoResponse {
    #[serde(flatten)]
    pub user: User,
    pub role: Option<Role>,
    pub jobs: Vec<Job>,
    pub completed: u32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LearningPathPayload {
    #[validate(length(min = 1))]
    pub goal: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[validate(range(min = 1, max = 80))]
    pub study_hours: u32,
}
