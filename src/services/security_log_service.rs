use crate::error::Result;
use crate::models::security_log::Severity;
use sqlx::PgPool;
use uuid::Uuid;

/// Append-only log of authentication-relevant events.
#[derive(Clone)]
pub struct SecurityLogService {
    pool: PgPool,
}

impl SecurityLogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn log(
        &self,
        user_id: Option<Uuid>,
        event: &str,
        severity: Severity,
        detail: Option<&str>,
        ip: Option<String>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO security_logs (user_id, event, severity, detail, ip_address)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id)
        .bind(event)
        .bind(severity.as_str())
        .bind(detail)
        .bind(ip)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
