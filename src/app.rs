use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};

use crate::{
    bbs::{
        client::BbsSession,
        parse::{self, ListingKind},
    },
    config::AppConfig,
    domain::ThreadLink,
    infrastructure::{
        archive::ArchiveWriter,
        confirm::{AutoApprove, Confirm, StdinConfirm},
        directories::ResolvedPaths,
        interrupt::Interrupt,
    },
    policy::{Blocklist, QuoteSplitter},
    scan::{
        coordinator::ScanCoordinator,
        executor::RemediationExecutor,
        state::{ScanState, ScanSummary},
    },
};

pub struct JanitorApp {
    config: Arc<AppConfig>,
    session: BbsSession,
    coordinator: ScanCoordinator<BbsSession>,
    interrupt: Interrupt,
}

impl JanitorApp {
    pub async fn initialize(
        config: AppConfig,
        paths: ResolvedPaths,
        interrupt: Interrupt,
    ) -> Result<Self> {
        let config = Arc::new(config);

        let blocklist = Blocklist::load(Path::new(&config.policy.blocklist_path))?;
        if blocklist.is_empty() {
            tracing::warn!(target: "policy", "blocklist is empty; nothing will ever match");
        } else {
            tracing::info!(target: "policy", terms = blocklist.len(), "blocklist loaded");
        }
        let splitter = QuoteSplitter::new(
            config.policy.quote_marker.clone(),
            config.policy.quote_closing.clone(),
        );

        let session = BbsSession::login(&config).await?;

        let confirm: Box<dyn Confirm> = if config.remediation.auto_approve {
            Box::new(AutoApprove)
        } else {
            Box::new(StdinConfirm)
        };
        let executor = RemediationExecutor::new(
            session.clone(),
            confirm,
            ArchiveWriter::new(paths.data_dir.clone()),
            config.remediation.notify_authors,
        );
        let coordinator = ScanCoordinator::new(blocklist, splitter, executor);

        Ok(Self {
            config,
            session,
            coordinator,
            interrupt,
        })
    }

    pub async fn run(self) -> Result<()> {
        let listing_url = self
            .session
            .resolve(&self.config.board.listing_url)
            .context("invalid listing url")?;
        let kind = ListingKind::from_url(&self.config.board.listing_url);

        let document = self
            .session
            .fetch_document(listing_url)
            .await
            .context("failed to fetch listing page")?;
        let links = parse::parse_listing(&document, kind).context("failed to parse listing page")?;
        tracing::info!(target: "scan", threads = links.len(), kind = ?kind, "listing parsed");

        let mut state = ScanState::new(self.config.policy.max_deletes);
        let mut summary = ScanSummary::default();

        for (index, link) in links.iter().enumerate() {
            if state.halted() {
                tracing::info!(
                    target: "scan",
                    deleted = state.deleted(),
                    "delete budget reached; stopping"
                );
                break;
            }
            if self.interrupt.is_triggered() {
                tracing::warn!(target: "scan", "interrupted; stopping");
                break;
            }

            if let Err(err) = self.scan_thread(link, &mut state, &mut summary).await {
                tracing::warn!(
                    target: "scan",
                    title = %link.title,
                    error = %err,
                    "thread scan failed; moving on"
                );
                summary.failed += 1;
            }

            if (index + 1) % 10 == 0 {
                tracing::info!(target: "scan", processed = index + 1, "progress");
            }
        }

        state.mark_exhausted();
        tracing::info!(
            target: "scan",
            phase = ?state.phase(),
            kept = summary.kept,
            edited = summary.edited,
            deleted = summary.deleted,
            declined = summary.declined,
            failed = summary.failed,
            skipped_invalid = summary.skipped_invalid,
            halted = summary.halted,
            "scan finished"
        );
        Ok(())
    }

    async fn scan_thread(
        &self,
        link: &ThreadLink,
        state: &mut ScanState,
        summary: &mut ScanSummary,
    ) -> Result<()> {
        let url = self.session.resolve(&link.href)?;
        let document = self.session.fetch_document(url).await?;
        let page = parse::parse_thread(&document)?;
        self.coordinator
            .scan_page(&link.title, &page, state, summary)
            .await;
        Ok(())
    }
}
