use crate::error::Result;
use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

/// Codes are short-lived by design; a resend supersedes the previous code.
pub const OTP_TTL_SECS: i64 = 100;

#[derive(Clone)]
pub struct OtpService {
    pool: PgPool,
}

pub fn generate_code() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{:06}", n)
}

impl OtpService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a fresh code for the user, invalidating any previous one.
    pub async fn issue(&self, user_id: Uuid) -> Result<String> {
        let code = generate_code();
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM otps WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "INSERT INTO otps (user_id, code, expires_at) VALUES ($1, $2, NOW() + make_interval(secs => $3))",
        )
        .bind(user_id)
        .bind(&code)
        .bind(OTP_TTL_SECS as f64)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(code)
    }

    /// Consume the code if it matches and has not expired. The delete makes
    /// the code single-use even under concurrent attempts.
    pub async fn verify(&self, user_id: Uuid, code: &str) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM otps WHERE user_id = $1 AND code = $2 AND expires_at > NOW()",
        )
        .bind(user_id)
        .bind(code)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn cleanup_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM otps WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_six_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
