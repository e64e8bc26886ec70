use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub account: AccountConfig,
    pub board: BoardConfig,
    pub policy: PolicyConfig,
    pub remediation: RemediationConfig,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct AccountConfig {
    pub user_id: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub base_url: String,
    pub listing_url: String,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct PolicyConfig {
    pub blocklist_path: String,
    pub max_deletes: u32,
    pub quote_marker: String,
    pub quote_closing: String,
}

#[derive(Debug, Clone)]
pub struct RemediationConfig {
    pub auto_approve: bool,
    pub notify_authors: bool,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
    pub data_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
