use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role_id: i32,
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
    pub learning_path: Option<JsonValue>,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Percentage of profile fields the user has filled in.
    pub fn profile_completion(&self) -> u32 {
        let filled = [
            Some(&self.name).filter(|s| !s.is_empty()).is_some(),
            !self.email.is_empty(),
            self.avatar.is_some(),
            self.phone.is_some(),
            self.bio.is_some(),
            self.location.is_some(),
            self.skills.as_ref().map(|s| !s.is_empty()).unwrap_or(false),
            self.dob.is_some(),
            self.gender.is_some(),
            self.summary.is_some(),
            self.experience.is_some(),
            self.cv_url.is_some(),
        ];
        let total = filled.len() as u32;
        let count = filled.iter().filter(|f| **f).count() as u32;
        (count * 100 + total / 2) / total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ana".into(),
            email: "ana@x.com".into(),
            password_hash: "hash".into(),
            role_id: 1,
            bio: None,
            skills: None,
            experience: None,
            location: None,
            avatar: None,
            phone: None,
            dob: None,
            gender: None,
            summary: None,
            cv_url: None,
            learning_path: None,
            is_verified: false,
            is_active: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn completion_counts_only_filled_fields() {
        let mut user = bare_user();
        assert_eq!(user.profile_completion(), 17); // name + email only

        user.bio = Some("bio".into());
        user.skills = Some(vec!["rust".into()]);
        user.location = Some("Berlin".into());
        assert!(user.profile_completion() > 17);
    }

    #[test]
    fn empty_skills_do_not_count() {
        let mut user = bare_user();
        let base = user.profile_completion();
        user.skills = Some(vec![]);
        assert_eq!(user.profile_completion(), base);
    }
}
