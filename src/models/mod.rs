pub mod application;
pub mod interview;
pub mod job;
pub mod role;
pub mod security_log;
pub mod user;
