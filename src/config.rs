use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_ttl_minutes: i64,
    pub public_rps: u32,
    pub cms_rps: u32,
    /// Lower-cased e-mails allowed to sign in to the editor.
    pub allowed_editor_emails: Vec<String>,
    pub editor_password_hash: String,
    pub sheet_webhook_url: Option<String>,
    pub company_name: String,
    pub log_json: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            jwt_ttl_minutes: get_env_parse_or("JWT_TTL_MINUTES", 720)?,
            public_rps: get_env_parse("PUBLIC_RPS")?,
            cms_rps: get_env_parse("CMS_RPS")?,
            allowed_editor_emails: parse_email_list(&get_env("ALLOWED_EDITOR_EMAILS")?),
            editor_password_hash: get_env("EDITOR_PASSWORD_HASH")?,
            sheet_webhook_url: env::var("SHEET_WEBHOOK_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            company_name: env::var("COMPANY_NAME").unwrap_or_else(|_| "BIVA".to_string()),
            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with("memory:")
    }
}

pub fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|email| email.trim().to_lowercase())
        .filter(|email| !email.is_empty())
        .collect()
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(_) => get_env_parse(name),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_list_is_trimmed_and_lowercased() {
        let emails = parse_email_list(" Editor@Example.com, ,hr@example.com ");
        assert_eq!(emails, vec!["editor@example.com", "hr@example.com"]);
    }
}
