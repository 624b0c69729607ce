use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub base_url: String,
    pub service_name: String,
    pub listen_port: String,
    pub database_url: String,
    pub database_pool_max_connections: u32,
    //email
    pub from_email: String,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub reviewer_email: String,
    #[serde(default = "default_company_name")]
    pub company_name: String,
    //uploads
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
    #[serde(default = "default_allowed_resume_extensions")]
    pub allowed_resume_extensions: String,
    //sessions
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: i32,
}

fn default_company_name() -> String {
    "Lead Management System".into()
}

fn default_upload_dir() -> String {
    "uploads".into()
}

fn default_max_upload_size() -> usize {
    10 * 1024 * 1024
}

fn default_allowed_resume_extensions() -> String {
    "pdf,doc,docx,txt".into()
}

fn default_session_ttl_minutes() -> i32 {
    30
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .add_source(Environment::default())
            .build()?;
        let s: Settings = conf.try_deserialize()?;
        Ok(s)
    }

    pub fn allowed_extensions(&self) -> Vec<String> {
        self.allowed_resume_extensions
            .split(',')
            .map(|ext| ext.trim().to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect()
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
