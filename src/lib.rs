pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    ai_service::AiService, assistant_service::AssistantService,
    interview_service::InterviewService, job_service::JobService, mail_service::MailService,
    otp_service::OtpService, security_log_service::SecurityLogService, user_service::UserService,
};
use reqwest::Client;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub job_service: JobService,
    pub interview_service: InterviewService,
    pub otp_service: OtpService,
    pub mail_service: MailService,
    pub security_log_service: SecurityLogService,
    pub ai_service: AiService,
    pub assistant_service: AssistantService,
}

impl AppState {
    pub fn new(pool: PgPool) -> crate::error::Result<Self> {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(crate::error::Error::from)?;

        let user_service = UserService::new(pool.clone());
        let job_service = JobService::new(pool.clone());
        let interview_service = InterviewService::new(pool.clone());
        let otp_service = OtpService::new(pool.clone());
        let mail_service = MailService::new(
            &config.smtp_host,
            &config.smtp_username,
            &config.smtp_password,
            &config.smtp_from,
        )?;
        let security_log_service = SecurityLogService::new(pool.clone());
        let ai_service = AiService::new(config.openai_api_key.clone(), http_client);
        let assistant_service = AssistantService::new(pool.clone(), ai_service.clone());

        Ok(Self {
            pool,
            user_service,
            job_service,
            interview_service,
            otp_service,
            mail_service,
            security_log_service,
            ai_service,
            assistant_service,
        })
    }
}
