use std::collections::HashMap;

use crate::{
    bbs::{BbsError, RemoteActions},
    domain::{Decision, ThreadPost},
    infrastructure::{archive::ArchiveWriter, confirm::Confirm},
    scan::state::ScanState,
};

const NOTICE_TITLE: &str = "Post deletion notice";

#[derive(Debug)]
pub enum ExecOutcome {
    Applied,
    Declined,
    Failed(BbsError),
}

/// Applies a classification decision against the remote service. All side
/// effects of a scan happen here: the confirmation prompt, the remote calls,
/// the budget bookkeeping, the removal archive, and the author notice.
pub struct RemediationExecutor<R> {
    remote: R,
    confirm: Box<dyn Confirm>,
    archive: ArchiveWriter,
    notify_authors: bool,
}

impl<R: RemoteActions> RemediationExecutor<R> {
    pub fn new(
        remote: R,
        confirm: Box<dyn Confirm>,
        archive: ArchiveWriter,
        notify_authors: bool,
    ) -> Self {
        Self {
            remote,
            confirm,
            archive,
            notify_authors,
        }
    }

    pub async fn execute(
        &self,
        title: &str,
        post: &ThreadPost,
        decision: &Decision,
        delform: &HashMap<String, String>,
        state: &mut ScanState,
    ) -> ExecOutcome {
        match decision {
            Decision::Keep => ExecOutcome::Applied,
            Decision::Delete { term } => self.delete(title, post, term, delform, state).await,
            Decision::Edit { new_body, term } => self.edit(title, post, new_body, term).await,
        }
    }

    async fn delete(
        &self,
        title: &str,
        post: &ThreadPost,
        term: &str,
        delform: &HashMap<String, String>,
        state: &mut ScanState,
    ) -> ExecOutcome {
        let prompt = format!(
            "Delete {}'s post \"{}\" (matched \"{}\")? [y/N] ",
            post.author, title, term
        );
        if !self.confirm.confirm(&prompt).await {
            tracing::info!(target: "scan", title, author = %post.author, "deletion declined");
            return ExecOutcome::Declined;
        }

        if let Err(err) = self.remote.delete_post(&post.delete_args, delform).await {
            tracing::warn!(target: "scan", title, author = %post.author, error = %err, "delete failed");
            return ExecOutcome::Failed(err);
        }

        state.record_delete();
        tracing::info!(
            target: "scan",
            title,
            author = %post.author,
            term,
            deleted = state.deleted(),
            budget = state.budget(),
            "post deleted"
        );

        if let Err(err) = self.archive.save(post, title, term).await {
            tracing::warn!(target: "archive", title, error = %err, "failed to archive deleted post");
        }
        if self.notify_authors {
            if let Err(err) = self
                .remote
                .send_notice(&post.author, NOTICE_TITLE, &post.body)
                .await
            {
                tracing::warn!(target: "bbs", author = %post.author, error = %err, "failed to mail author");
            }
        }

        ExecOutcome::Applied
    }

    async fn edit(&self, title: &str, post: &ThreadPost, new_body: &str, term: &str) -> ExecOutcome {
        let Some(edit_link) = post.edit_link.as_deref() else {
            tracing::warn!(target: "scan", title, author = %post.author, "edit decided but post has no edit link");
            return ExecOutcome::Failed(BbsError::NotEditable);
        };

        match self.remote.replace_body(edit_link, new_body).await {
            Ok(()) => {
                tracing::info!(target: "scan", title, author = %post.author, term, "quoted violation stripped");
                ExecOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(target: "scan", title, author = %post.author, error = %err, "edit failed");
                ExecOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tempfile::TempDir;

    use super::*;
    use crate::domain::{DeleteArgs, PostRole};

    /// Scripted remote: counts calls, optionally fails them.
    #[derive(Clone, Default)]
    pub(crate) struct FakeRemote {
        pub deletes: Arc<Mutex<Vec<DeleteArgs>>>,
        pub edits: Arc<Mutex<Vec<(String, String)>>>,
        pub notices: Arc<Mutex<Vec<String>>>,
        pub reject_deletes: bool,
    }

    #[async_trait]
    impl RemoteActions for FakeRemote {
        async fn delete_post(
            &self,
            args: &DeleteArgs,
            _delform: &HashMap<String, String>,
        ) -> Result<(), BbsError> {
            if self.reject_deletes {
                return Err(BbsError::Rejected { action: "delete" });
            }
            self.deletes.lock().unwrap().push(args.clone());
            Ok(())
        }

        async fn replace_body(&self, edit_link: &str, new_body: &str) -> Result<(), BbsError> {
            self.edits
                .lock()
                .unwrap()
                .push((edit_link.to_string(), new_body.to_string()));
            Ok(())
        }

        async fn send_notice(&self, author: &str, _title: &str, _body: &str) -> Result<(), BbsError> {
            self.notices.lock().unwrap().push(author.to_string());
            Ok(())
        }
    }

    pub(crate) struct ScriptedConfirm(pub bool);

    #[async_trait]
    impl Confirm for ScriptedConfirm {
        async fn confirm(&self, _prompt: &str) -> bool {
            self.0
        }
    }

    pub(crate) fn reply(body: &str) -> ThreadPost {
        ThreadPost {
            role: PostRole::Reply,
            author: "mallory".to_string(),
            body: body.to_string(),
            delete_args: DeleteArgs {
                file: "Test".to_string(),
                id: "7".to_string(),
                ding_flag: "0".to_string(),
            },
            edit_link: Some("/mitbbs_bbsedit.php?id=7".to_string()),
        }
    }

    fn executor(
        remote: FakeRemote,
        approve: bool,
        dir: &TempDir,
    ) -> RemediationExecutor<FakeRemote> {
        RemediationExecutor::new(
            remote,
            Box::new(ScriptedConfirm(approve)),
            ArchiveWriter::new(dir.path().to_path_buf()),
            false,
        )
    }

    #[tokio::test]
    async fn keep_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let remote = FakeRemote::default();
        let exec = executor(remote.clone(), true, &dir);
        let mut state = ScanState::new(5);

        let outcome = exec
            .execute("t", &reply("fine"), &Decision::Keep, &HashMap::new(), &mut state)
            .await;
        assert!(matches!(outcome, ExecOutcome::Applied));
        assert_eq!(state.deleted(), 0);
        assert!(remote.deletes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn confirmed_delete_counts_and_archives() {
        let dir = TempDir::new().unwrap();
        let remote = FakeRemote::default();
        let exec = executor(remote.clone(), true, &dir);
        let mut state = ScanState::new(5);

        let decision = Decision::Delete {
            term: "spam".to_string(),
        };
        let outcome = exec
            .execute("t", &reply("spam body"), &decision, &HashMap::new(), &mut state)
            .await;

        assert!(matches!(outcome, ExecOutcome::Applied));
        assert_eq!(state.deleted(), 1);
        assert_eq!(remote.deletes.lock().unwrap().len(), 1);
        assert_eq!(dir.path().read_dir().unwrap().count(), 1);
    }

    #[tokio::test]
    async fn declined_delete_leaves_state_untouched() {
        let dir = TempDir::new().unwrap();
        let remote = FakeRemote::default();
        let exec = executor(remote.clone(), false, &dir);
        let mut state = ScanState::new(5);

        let decision = Decision::Delete {
            term: "spam".to_string(),
        };
        let outcome = exec
            .execute("t", &reply("spam body"), &decision, &HashMap::new(), &mut state)
            .await;

        assert!(matches!(outcome, ExecOutcome::Declined));
        assert_eq!(state.deleted(), 0);
        assert!(remote.deletes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejected_delete_is_a_failure_not_a_count() {
        let dir = TempDir::new().unwrap();
        let remote = FakeRemote {
            reject_deletes: true,
            ..FakeRemote::default()
        };
        let exec = executor(remote.clone(), true, &dir);
        let mut state = ScanState::new(5);

        let decision = Decision::Delete {
            term: "spam".to_string(),
        };
        let outcome = exec
            .execute("t", &reply("spam body"), &decision, &HashMap::new(), &mut state)
            .await;

        assert!(matches!(outcome, ExecOutcome::Failed(BbsError::Rejected { .. })));
        assert_eq!(state.deleted(), 0);
    }

    #[tokio::test]
    async fn edit_substitutes_the_own_text() {
        let dir = TempDir::new().unwrap();
        let remote = FakeRemote::default();
        let exec = executor(remote.clone(), true, &dir);
        let mut state = ScanState::new(5);

        let decision = Decision::Edit {
            new_body: "my own words".to_string(),
            term: "nyc".to_string(),
        };
        let outcome = exec
            .execute("t", &reply("irrelevant"), &decision, &HashMap::new(), &mut state)
            .await;

        assert!(matches!(outcome, ExecOutcome::Applied));
        let edits = remote.edits.lock().unwrap();
        assert_eq!(
            edits.as_slice(),
            &[(
                "/mitbbs_bbsedit.php?id=7".to_string(),
                "my own words".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn edit_without_link_fails() {
        let dir = TempDir::new().unwrap();
        let remote = FakeRemote::default();
        let exec = executor(remote.clone(), true, &dir);
        let mut state = ScanState::new(5);

        let mut post = reply("irrelevant");
        post.edit_link = None;
        let decision = Decision::Edit {
            new_body: "x".to_string(),
            term: "nyc".to_string(),
        };
        let outcome = exec
            .execute("t", &post, &decision, &HashMap::new(), &mut state)
            .await;
        assert!(matches!(outcome, ExecOutcome::Failed(BbsError::NotEditable)));
    }
}
