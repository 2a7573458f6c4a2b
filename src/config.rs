use crate::error::{Error, Result};
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub access_token_secret: String,
    pub refresh_token_secret: String,
    pub openai_api_key: String,
    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
    pub smtp_from: String,
    pub cors_allowed_origins: Vec<String>,
    pub environment: String,
    pub assistant_max_queries: u32,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            access_token_secret: get_env("ACCESS_TOKEN_SECRET")?,
            refresh_token_secret: get_env("REFRESH_TOKEN_SECRET")?,
            openai_api_key: get_env("OPENAI_API_KEY")?,
            smtp_host: get_env("SMTP_HOST")?,
            smtp_username: get_env("SMTP_USERNAME")?,
            smtp_password: get_env("SMTP_PASSWORD")?,
            smtp_from: get_env("SMTP_FROM")?,
            cors_allowed_origins: get_env("CORS_ALLOWED_ORIGINS")?
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            assistant_max_queries: env::var("ASSISTANT_MAX_QUERIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
