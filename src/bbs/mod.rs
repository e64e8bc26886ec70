pub mod client;
pub mod parse;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::DeleteArgs;

#[derive(Debug, Error)]
pub enum BbsError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("page structure mismatch: {0}")]
    Parse(String),
    #[error("remote service rejected {action}")]
    Rejected { action: &'static str },
    #[error("post has no edit link")]
    NotEditable,
}

/// The remote mutations the executor can issue. `BbsSession` is the live
/// implementation; tests script their own.
#[async_trait]
pub trait RemoteActions: Send + Sync {
    async fn delete_post(
        &self,
        args: &DeleteArgs,
        delform: &HashMap<String, String>,
    ) -> Result<(), BbsError>;

    async fn replace_body(&self, edit_link: &str, new_body: &str) -> Result<(), BbsError>;

    async fn send_notice(&self, author: &str, title: &str, body: &str) -> Result<(), BbsError>;
}
