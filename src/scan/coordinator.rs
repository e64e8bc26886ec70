use crate::{
    bbs::{parse::ThreadPage, RemoteActions},
    domain::Decision,
    policy::{classify, Blocklist, QuoteSplitter},
    scan::{
        executor::{ExecOutcome, RemediationExecutor},
        state::{ScanState, ScanSummary},
    },
};

/// Drives one thread page through classify → execute, in display order. A
/// single malformed or failing item never stops the page; the budget halt
/// stops everything that follows it.
pub struct ScanCoordinator<R> {
    blocklist: Blocklist,
    splitter: QuoteSplitter,
    executor: RemediationExecutor<R>,
}

impl<R: RemoteActions> ScanCoordinator<R> {
    pub fn new(
        blocklist: Blocklist,
        splitter: QuoteSplitter,
        executor: RemediationExecutor<R>,
    ) -> Self {
        Self {
            blocklist,
            splitter,
            executor,
        }
    }

    pub async fn scan_page(
        &self,
        title: &str,
        page: &ThreadPage,
        state: &mut ScanState,
        summary: &mut ScanSummary,
    ) {
        for entry in &page.posts {
            if state.halted() {
                summary.halted += 1;
                continue;
            }

            let post = match entry {
                Ok(post) => post,
                Err(err) => {
                    tracing::warn!(target: "scan", title, error = %err, "skipping malformed post");
                    summary.skipped_invalid += 1;
                    continue;
                }
            };

            let decision = classify(post, &self.blocklist, &self.splitter);
            if !matches!(decision, Decision::Keep) {
                tracing::info!(
                    target: "scan",
                    title,
                    author = %post.author,
                    action = decision.label(),
                    "blocklist hit"
                );
            }

            match self
                .executor
                .execute(title, post, &decision, &page.delform, state)
                .await
            {
                ExecOutcome::Applied => match decision {
                    Decision::Keep => summary.kept += 1,
                    Decision::Edit { .. } => summary.edited += 1,
                    Decision::Delete { .. } => summary.deleted += 1,
                },
                ExecOutcome::Declined => summary.declined += 1,
                ExecOutcome::Failed(_) => summary.failed += 1,
            }
        }
    }
}
