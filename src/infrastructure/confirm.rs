use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Capability to approve one destructive action. Implementations must treat
/// anything that is not an explicit yes as a no.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Selected by `AUTO_APPROVE=true` for unattended runs.
pub struct AutoApprove;

#[async_trait]
impl Confirm for AutoApprove {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Asks the operator on stdin.
pub struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        use std::io::Write;

        print!("{prompt}");
        let _ = std::io::stdout().flush();

        let mut answer = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());
        if reader.read_line(&mut answer).await.is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().chars().next(), Some('y' | 'Y'))
}
