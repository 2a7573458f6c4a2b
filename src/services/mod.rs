pub mod ai_service;
pub mod assistant_service;
pub mod interview_service;
pub mod job_service;
pub mod mail_service;
pub mod otp_service;
pub mod security_log_service;
pub mod user_service;
