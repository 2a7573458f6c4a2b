use crate::dto::assistant_dto::{
    AskPayload, AssistantFilters, AssistantIntent, AssistantResponse, DateBucket, QueryType,
    MAX_HISTORY_TURNS, MAX_RESULT_ROWS,
};
use crate::error::{Error, Result};
use crate::middleware::auth::AuthUser;
use crate::services::ai_service::AiService;
use crate::utils::mask::mask_email;
use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Crude content filter for obviously destructive or script-flavored input.
/// This is a usability guard, not a security boundary; every query the
/// assistant can run is parametrized and ownership-scoped anyway.
const DENYLIST: &[&str] = &[
    "delete", "drop", "truncate", "insert", "update", "alter", "script", "exec(",
];

pub fn is_blocked_question(question: &str) -> bool {
    let lowered = question.to_lowercase();
    DENYLIST.iter().any(|term| lowered.contains(term))
}

/// Lower bound of a coarse date bucket, evaluated at request time.
pub fn bucket_start(bucket: DateBucket, now: DateTime<Utc>) -> DateTime<Utc> {
    match bucket {
        DateBucket::Today => now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or(now),
        DateBucket::ThisWeek => now - Duration::days(i64::from(now.weekday().num_days_from_monday())),
        DateBucket::ThisMonth => now - Duration::days(i64::from(now.day().saturating_sub(1))),
    }
}

#[derive(Debug, Serialize, FromRow)]
struct PostedJobRow {
    id: Uuid,
    title: String,
    company: String,
    location: String,
    job_type: Option<String>,
    posted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
struct ApplicationRow {
    id: Uuid,
    status: String,
    applied_at: DateTime<Utc>,
    job_title: String,
    candidate_name: String,
    candidate_email: String,
}

#[derive(Debug, Serialize, FromRow)]
struct InterviewRow {
    id: Uuid,
    mode: String,
    status: String,
    scheduled_at: DateTime<Utc>,
    job_title: String,
    candidate_name: String,
}

#[derive(Clone)]
pub struct AssistantService {
    pool: PgPool,
    ai: AiService,
}

impl AssistantService {
    pub fn new(pool: PgPool, ai: AiService) -> Self {
        Self { pool, ai }
    }

    pub async fn ask(&self, caller: &AuthUser, payload: AskPayload) -> Result<AssistantResponse> {
        if is_blocked_question(&payload.question) {
            return Err(Error::Forbidden(
                "This request contains terms that are not allowed".to_string(),
            ));
        }

        let config = crate::config::get_config();
        if payload.query_count >= config.assistant_max_queries {
            return Ok(AssistantResponse::message(
                "You have reached the assistant query limit for now. Please try again later.",
                Vec::new(),
            ));
        }

        let history = if payload.history.len() > MAX_HISTORY_TURNS {
            &payload.history[payload.history.len() - MAX_HISTORY_TURNS..]
        } else {
            &payload.history[..]
        };

        let reply = self.ai.classify_question(&payload.question, history).await?;

        match reply.intent {
            AssistantIntent::Message => {
                let text = reply
                    .message
                    .unwrap_or_else(|| "How can I help you with your recruitment data?".to_string());
                let mut suggestions = reply.suggestions;
                suggestions.truncate(3);
                Ok(AssistantResponse::message(text, suggestions))
            }
            AssistantIntent::Data => {
                let query_type = reply.query_type.ok_or_else(|| {
                    Error::Internal("Assistant data reply carried no query type".to_string())
                })?;
                let filters = reply.filters.unwrap_or_default();
                let rows = self.run_query(caller.id, query_type, &filters).await?;

                if rows.as_array().map(|a| a.is_empty()).unwrap_or(true) {
                    let mut suggestions = reply.suggestions;
                    suggestions.truncate(3);
                    return Ok(AssistantResponse::message(
                        "No records found for your query.",
                        suggestions,
                    ));
                }
                Ok(AssistantResponse::data(rows))
            }
        }
    }

    /// Exactly one parametrized, ownership-scoped read per data reply. The
    /// caller id is baked into every predicate; nothing the model returns is
    /// ever interpolated into SQL.
    async fn run_query(
        &self,
        caller_id: Uuid,
        query_type: QueryType,
        filters: &AssistantFilters,
    ) -> Result<serde_json::Value> {
        let since = filters.date_range.map(|b| bucket_start(b, Utc::now()));

        match query_type {
            QueryType::PostedJobs => {
                let rows = sqlx::query_as::<_, PostedJobRow>(
                    r#"
                    SELECT id, title, company, location, job_type, posted_at
                    FROM jobs
                    WHERE user_id = $1
                      AND ($2::text IS NULL OR title ILIKE '%' || $2 || '%')
                      AND ($3::timestamptz IS NULL OR posted_at >= $3)
                    ORDER BY posted_at DESC
                    LIMIT $4
                    "#,
                )
                .bind(caller_id)
                .bind(&filters.job_title)
                .bind(since)
                .bind(MAX_RESULT_ROWS)
                .fetch_all(&self.pool)
                .await?;
                Ok(serde_json::to_value(rows)?)
            }
            QueryType::Applications => {
                let mut rows = sqlx::query_as::<_, ApplicationRow>(
                    r#"
                    SELECT a.id, a.status, a.applied_at,
                           j.title AS job_title, u.name AS candidate_name, u.email AS candidate_email
                    FROM applications a
                    JOIN jobs j ON j.id = a.job_id AND j.user_id = $1
                    JOIN users u ON u.id = a.user_id
                    WHERE ($2::text IS NULL OR a.status = $2)
                      AND ($3::text IS NULL OR j.title ILIKE '%' || $3 || '%')
                      AND ($4::text IS NULL OR u.name ILIKE '%' || $4 || '%')
                      AND ($5::timestamptz IS NULL OR a.applied_at >= $5)
                    ORDER BY a.applied_at DESC
                    LIMIT $6
                    "#,
                )
                .bind(caller_id)
                .bind(&filters.status)
                .bind(&filters.job_title)
                .bind(&filters.candidate_name)
                .bind(since)
                .bind(MAX_RESULT_ROWS)
                .fetch_all(&self.pool)
                .await?;
                for row in &mut rows {
                    row.candidate_email = mask_email(&row.candidate_email);
                }
                Ok(serde_json::to_value(rows)?)
            }
            QueryType::Interviews => {
                let rows = sqlx::query_as::<_, InterviewRow>(
                    r#"
                    SELECT i.id, i.mode, i.status, i.scheduled_at,
                           j.title AS job_title, u.name AS candidate_name
                    FROM interviews i
                    JOIN jobs j ON j.id = i.job_id
                    JOIN applications a ON a.id = i.application_id
                    JOIN users u ON u.id = a.user_id
                    WHERE i.recruiter_id = $1
                      AND ($2::text IS NULL OR i.status = $2)
                      AND ($3::text IS NULL OR j.title ILIKE '%' || $3 || '%')
                      AND ($4::text IS NULL OR u.name ILIKE '%' || $4 || '%')
                      AND ($5::timestamptz IS NULL OR i.scheduled_at >= $5)
                    ORDER BY i.scheduled_at DESC
                    LIMIT $6
                    "#,
                )
                .bind(caller_id)
                .bind(&filters.status)
                .bind(&filters.job_title)
                .bind(&filters.candidate_name)
                .bind(since)
                .bind(MAX_RESULT_ROWS)
                .fetch_all(&self.pool)
                .await?;
                Ok(serde_json::to_value(rows)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn denylist_blocks_destructive_phrasing() {
        assert!(is_blocked_question("DELETE all my applications"));
        assert!(is_blocked_question("please drop the interviews table"));
        assert!(is_blocked_question("run <script>alert(1)</script>"));
        assert!(!is_blocked_question("show my pending applications"));
        assert!(!is_blocked_question("who applied to the backend role?"));
    }

    #[test]
    fn bucket_start_boundaries() {
        // 2026-08-26 15:30 UTC is a Wednesday.
        let now = Utc.with_ymd_and_hms(2026, 8, 26, 15, 30, 0).unwrap();

        let today = bucket_start(DateBucket::Today, now);
        assert_eq!(today, Utc.with_ymd_and_hms(2026, 8, 26, 0, 0, 0).unwrap());

        let week = bucket_start(DateBucket::ThisWeek, now);
        assert_eq!(week.date_naive().to_string(), "2026-08-24");

        let month = bucket_start(DateBucket::ThisMonth, now);
        assert_eq!(month.date_naive().to_string(), "2026-08-01");
    }
}
