pub mod assistant_dto;
pub mod auth_dto;
pub mod interview_dto;
pub mod job_dto;
pub mod user_dto;
