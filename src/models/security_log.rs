use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Append-only audit record of authentication events. Never updated or
/// deleted by request flow.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SecurityLog {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub event: String,
    pub severity: String,
    pub detail: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}
