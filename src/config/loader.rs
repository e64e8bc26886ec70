use std::env;
use std::time::Duration;

use super::env::{
    AccountConfig, AppConfig, BoardConfig, ConfigError, DirectoryConfig, LoggingConfig,
    PolicyConfig, RemediationConfig,
};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let account = AccountConfig {
            user_id: require("BBS_USER_ID")?,
            password: require("BBS_PASSWORD")?,
        };

        let board = BoardConfig {
            base_url: env::var("BBS_BASE_URL")
                .unwrap_or_else(|_| "http://www.mitbbs.com".to_string()),
            listing_url: require("BOARD_URL")?,
            request_timeout: Duration::from_millis(
                env::var("REQUEST_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(15_000),
            ),
        };

        let max_deletes = match env::var("MAX_DELETE_COUNT") {
            Err(_) => 10,
            Ok(raw) => match raw.trim().parse::<u32>() {
                Ok(value) if value > 0 => value,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        key: "MAX_DELETE_COUNT",
                        reason: "must be a positive integer".to_string(),
                    })
                }
                Err(err) => {
                    return Err(ConfigError::Invalid {
                        key: "MAX_DELETE_COUNT",
                        reason: err.to_string(),
                    })
                }
            },
        };

        let policy = PolicyConfig {
            blocklist_path: env::var("BLOCKLIST_PATH")
                .unwrap_or_else(|_| "blocklist.txt".to_string()),
            max_deletes,
            quote_marker: env::var("QUOTE_MARKER")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "的大作中提到".to_string()),
            quote_closing: env::var("QUOTE_CLOSING").unwrap_or_else(|_| "：】".to_string()),
        };

        let remediation = RemediationConfig {
            auto_approve: parse_flag("AUTO_APPROVE"),
            notify_authors: parse_flag("NOTIFY_AUTHORS"),
        };

        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        Ok(Self {
            account,
            board,
            policy,
            remediation,
            directories,
            logging,
        })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn parse_flag(key: &str) -> bool {
    env::var(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
