use crate::dto::job_dto::{ApplicationListQuery, CreateJobPayload};
use crate::error::{Error, Result};
use crate::models::application::{
    Application, ApplicationStatus, ApplicationWithApplicant, ApplicationWithJob,
};
use crate::models::job::Job;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, owner_id: Uuid, payload: CreateJobPayload) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (user_id, title, company, location, skills, experience_level, salary_range, job_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(payload.title)
        .bind(payload.company)
        .bind(payload.location)
        .bind(payload.skills)
        .bind(payload.experience_level)
        .bind(payload.salary_range)
        .bind(payload.job_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    pub async fn list_all(&self) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>("SELECT * FROM jobs ORDER BY posted_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE user_id = $1 ORDER BY posted_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    pub async fn get(&self, job_id: Uuid) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    /// Submit an application in `pending` status. The unique (user, job)
    /// constraint makes the duplicate check race-free: a second insert simply
    /// affects no rows.
    pub async fn apply(&self, user_id: Uuid, job_id: Uuid) -> Result<Application> {
        if self.get(job_id).await?.is_none() {
            return Err(Error::NotFound("Job not found".to_string()));
        }

        let application = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (user_id, job_id, status)
            VALUES ($1, $2, 'pending')
            ON CONFLICT (user_id, job_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::BadRequest("You have already applied for this job".to_string()))?;

        Ok(application)
    }

    /// Applications submitted by the caller, newest first, with optional
    /// exact-status and inclusive applied-at range filters.
    pub async fn list_for_applicant(
        &self,
        user_id: Uuid,
        query: &ApplicationListQuery,
    ) -> Result<Vec<ApplicationWithJob>> {
        let applications = sqlx::query_as::<_, ApplicationWithJob>(
            r#"
            SELECT a.id, a.job_id, a.status, a.applied_at,
                   j.title, j.company, j.location, j.job_type
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE a.user_id = $1
              AND ($2::text IS NULL OR a.status = $2)
              AND ($3::timestamptz IS NULL OR a.applied_at >= $3)
              AND ($4::timestamptz IS NULL OR a.applied_at <= $4)
            ORDER BY a.applied_at DESC
            "#,
        )
        .bind(user_id)
        .bind(&query.status)
        .bind(query.from_date)
        .bind(query.to_date)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    /// All applications for a job the caller owns, with applicant identity.
    pub async fn list_applicants(
        &self,
        job_id: Uuid,
        caller_id: Uuid,
    ) -> Result<Vec<ApplicationWithApplicant>> {
        let job = self
            .get(job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        if job.user_id != caller_id {
            return Err(Error::Forbidden(
                "You do not own this job posting".to_string(),
            ));
        }

        let applicants = sqlx::query_as::<_, ApplicationWithApplicant>(
            r#"
            SELECT a.id, a.user_id, a.status, a.applied_at,
                   u.name AS applicant_name, u.email AS applicant_email,
                   u.skills AS applicant_skills, u.cv_url
            FROM applications a
            JOIN users u ON u.id = a.user_id
            WHERE a.job_id = $1
            ORDER BY a.applied_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applicants)
    }

    pub async fn get_application(&self, application_id: Uuid) -> Result<Option<Application>> {
        let application =
            sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = $1")
                .bind(application_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(application)
    }

    /// Set the status of an application belonging to a job the caller owns.
    pub async fn update_status(
        &self,
        application_id: Uuid,
        caller_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Application> {
        let application = self
            .get_application(application_id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;
        let job = self
            .get(application.job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        if job.user_id != caller_id {
            return Err(Error::Forbidden(
                "You do not own the job this application belongs to".to_string(),
            ));
        }

        let updated = sqlx::query_as::<_, Application>(
            "UPDATE applications SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(application_id)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    /// Delete an application; allowed for the applicant and the owning
    /// recruiter only.
    pub async fn delete_application(&self, application_id: Uuid, caller_id: Uuid) -> Result<()> {
        let application = self
            .get_application(application_id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;
        let job = self
            .get(application.job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

        if application.user_id != caller_id && job.user_id != caller_id {
            return Err(Error::Forbidden(
                "Only the applicant or the job owner can delete this application".to_string(),
            ));
        }

        sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(application_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
