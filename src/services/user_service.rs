use crate::dto::user_dto::UpdateUserPayload;
use crate::error::{Error, Result};
use crate::models::job::Job;
use crate::models::user::User;
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role_id: i32,
    ) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Compensating rollback for failed registrations.
    pub async fn delete_user(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn mark_verified(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE users SET is_verified = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_active(&self, id: Uuid, active: bool) -> Result<()> {
        sqlx::query("UPDATE users SET is_active = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn update_profile(&self, id: Uuid, payload: UpdateUserPayload) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                bio = COALESCE($3, bio),
                skills = COALESCE($4, skills),
                experience = COALESCE($5, experience),
                location = COALESCE($6, location),
                avatar = COALESCE($7, avatar),
                phone = COALESCE($8, phone),
                dob = COALESCE($9, dob),
                gender = COALESCE($10, gender),
                summary = COALESCE($11, summary),
                cv_url = COALESCE($12, cv_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.name)
        .bind(payload.bio)
        .bind(payload.skills)
        .bind(payload.experience)
        .bind(payload.location)
        .bind(payload.avatar)
        .bind(payload.phone)
        .bind(payload.dob)
        .bind(payload.gender)
        .bind(payload.summary)
        .bind(payload.cv_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
        Ok(user)
    }

    pub async fn jobs_owned_by(&self, user_id: Uuid) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE user_id = $1 ORDER BY posted_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    pub async fn set_learning_path(&self, id: Uuid, path: Option<JsonValue>) -> Result<()> {
        let result =
            sqlx::query("UPDATE users SET learning_path = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(path)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("User not found".to_string()));
        }
        Ok(())
    }
}
