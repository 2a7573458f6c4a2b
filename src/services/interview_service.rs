use crate::dto::interview_dto::UpdateInterviewPayload;
use crate::error::{Error, Result};
use crate::models::interview::{Interview, InterviewDetails, STATUS_CANCELLED, STATUS_SCHEDULED};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct InterviewService {
    pool: PgPool,
}

impl InterviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Schedule an interview for an application whose job the caller owns.
    pub async fn schedule(
        &self,
        recruiter_id: Uuid,
        application_id: Uuid,
        mode: &str,
        scheduled_at: DateTime<Utc>,
        notes: Option<&str>,
    ) -> Result<Interview> {
        let row: Option<(Uuid, Uuid)> = sqlx::query_as(
            r#"
            SELECT a.job_id, j.user_id
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE a.id = $1
            "#,
        )
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await?;

        let (job_id, owner_id) =
            row.ok_or_else(|| Error::NotFound("Application not found".to_string()))?;
        if owner_id != recruiter_id {
            return Err(Error::Forbidden(
                "You do not own the job this application belongs to".to_string(),
            ));
        }

        let interview = sqlx::query_as::<_, Interview>(
            r#"
            INSERT INTO interviews (application_id, job_id, recruiter_id, mode, scheduled_at, notes, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'scheduled')
            RETURNING *
            "#,
        )
        .bind(application_id)
        .bind(job_id)
        .bind(recruiter_id)
        .bind(mode)
        .bind(scheduled_at)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(interview)
    }

    async fn get_owned(&self, interview_id: Uuid, recruiter_id: Uuid) -> Result<Interview> {
        let interview = sqlx::query_as::<_, Interview>("SELECT * FROM interviews WHERE id = $1")
            .bind(interview_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Interview not found".to_string()))?;
        if interview.recruiter_id != recruiter_id {
            return Err(Error::Forbidden(
                "You did not schedule this interview".to_string(),
            ));
        }
        Ok(interview)
    }

    /// Partial update of mode/notes/schedule, only while still scheduled.
    pub async fn update(
        &self,
        recruiter_id: Uuid,
        payload: &UpdateInterviewPayload,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> Result<Interview> {
        let interview = self.get_owned(payload.interview_id, recruiter_id).await?;
        if interview.status != STATUS_SCHEDULED {
            return Err(Error::BadRequest(
                "Only scheduled interviews can be updated".to_string(),
            ));
        }

        let updated = sqlx::query_as::<_, Interview>(
            r#"
            UPDATE interviews SET
                mode = COALESCE($2, mode),
                notes = COALESCE($3, notes),
                scheduled_at = COALESCE($4, scheduled_at)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(payload.interview_id)
        .bind(&payload.mode)
        .bind(&payload.notes)
        .bind(scheduled_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn cancel(&self, recruiter_id: Uuid, interview_id: Uuid) -> Result<Interview> {
        self.get_owned(interview_id, recruiter_id).await?;
        let cancelled = sqlx::query_as::<_, Interview>(
            "UPDATE interviews SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(interview_id)
        .bind(STATUS_CANCELLED)
        .fetch_one(&self.pool)
        .await?;
        Ok(cancelled)
    }

    /// Scheduled, future interviews set up by the caller.
    pub async fn upcoming_for_recruiter(&self, recruiter_id: Uuid) -> Result<Vec<InterviewDetails>> {
        let interviews = sqlx::query_as::<_, InterviewDetails>(
            r#"
            SELECT i.id, i.application_id, i.mode, i.scheduled_at, i.notes, i.status,
                   j.title AS job_title, j.company, u.name AS candidate_name
            FROM interviews i
            JOIN jobs j ON j.id = i.job_id
            JOIN applications a ON a.id = i.application_id
            JOIN users u ON u.id = a.user_id
            WHERE i.recruiter_id = $1
              AND i.status = 'scheduled'
              AND i.scheduled_at > NOW()
            ORDER BY i.scheduled_at ASC
            "#,
        )
        .bind(recruiter_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(interviews)
    }

    /// Interviews reached through the caller's own applications.
    pub async fn list_for_applicant(&self, user_id: Uuid) -> Result<Vec<InterviewDetails>> {
        let interviews = sqlx::query_as::<_, InterviewDetails>(
            r#"
            SELECT i.id, i.application_id, i.mode, i.scheduled_at, i.notes, i.status,
                   j.title AS job_title, j.company, u.name AS candidate_name
            FROM interviews i
            JOIN jobs j ON j.id = i.job_id
            JOIN applications a ON a.id = i.application_id
            JOIN users u ON u.id = a.user_id
            WHERE a.user_id = $1
            ORDER BY i.scheduled_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(interviews)
    }
}
