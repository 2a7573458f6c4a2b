use crate::error::{Error, Result};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::services::otp_service::OTP_TTL_SECS;

#[derive(Clone)]
pub struct MailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl MailService {
    pub fn new(host: &str, username: &str, password: &str, from: &str) -> Result<Self> {
        let creds = Credentials::new(username.to_string(), password.to_string());
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .map_err(|e| Error::Mail(format!("Invalid SMTP relay {}: {}", host, e)))?
            .credentials(creds)
            .build();
        Ok(Self {
            mailer,
            from: from.to_string(),
        })
    }

    pub async fn send_otp(&self, to: &str, name: &str, code: &str) -> Result<()> {
        let body = format!(
            "<p>Hi {},</p>\
             <p>Your verification code is <b>{}</b>.</p>\
             <p>It expires in {} seconds.</p>",
            name, code, OTP_TTL_SECS
        );
        let email = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| Error::Mail(format!("Invalid sender address: {:?}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| Error::Mail(format!("Invalid recipient address: {:?}", e)))?)
            .subject("Verify your email")
            .header(ContentType::TEXT_HTML)
            .body(body)
            .map_err(|e| Error::Mail(e.to_string()))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| Error::Mail(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builds_async_transport_for_a_relay_host() {
        let svc = MailService::new(
            "smtp.example.com",
            "user",
            "pass",
            "Jobs <no-reply@example.com>",
        );
        assert!(svc.is_ok());
    }

    #[tokio::test]
    async fn rejects_unparseable_sender() {
        let svc = MailService::new("smtp.example.com", "user", "pass", "not an address")
            .expect("transport builds regardless of sender");
        let err = svc.send_otp("to@example.com", "Ana", "123456").await;
        assert!(matches!(err, Err(Error::Mail(_))));
    }
}
