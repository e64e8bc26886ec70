use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::{config::AppConfig, domain::DeleteArgs};

use super::{parse, BbsError, RemoteActions};

const LOGIN_PATH: &str = "/newindex/mitbbs_bbslogin.php";
const DELETE_PATH: &str = "/mitbbs_bbsdel.php";
const EDIT_SUBMIT_PATH: &str = "/mitbbs_bbsedit_charge.php";
const MAIL_PATH: &str = "/mitbbs_bbssndmail.php";

// The board serves legacy pages without a charset header.
const PAGE_CHARSET: &str = "gb2312";

const DELETE_OK_MARKER: &str = "删除成功";
const EDIT_OK_MARKER: &str = "修改文章成功";
const MAIL_OK_MARKER: &str = "信件已成功发送";

/// Authenticated session against one board host. Cheap to clone; every clone
/// shares the cookie jar established at login.
#[derive(Clone)]
pub struct BbsSession {
    http: Client,
    base: Url,
}

impl BbsSession {
    pub async fn login(config: &AppConfig) -> Result<Self> {
        let base = Url::parse(&config.board.base_url)
            .with_context(|| format!("invalid base url {}", config.board.base_url))?;
        let http = Client::builder()
            .user_agent(format!("bbs-janitor/{}", env!("CARGO_PKG_VERSION")))
            .cookie_store(true)
            .timeout(config.board.request_timeout)
            .build()?;

        let form = [
            ("id", config.account.user_id.as_str()),
            ("passwd", config.account.password.as_str()),
            ("kick_multi", "1"),
        ];
        let login_url = base.join(LOGIN_PATH)?;
        http.post(login_url)
            .form(&form)
            .send()
            .await
            .context("login request failed")?
            .error_for_status()
            .context("login rejected")?;

        tracing::info!(target: "bbs", user = %config.account.user_id, "logged in");
        Ok(Self { http, base })
    }

    /// Resolves a listing href (absolute or relative) against the board host.
    pub fn resolve(&self, href: &str) -> Result<Url, BbsError> {
        self.base
            .join(href)
            .map_err(|err| BbsError::Parse(format!("bad link {href}: {err}")))
    }

    pub async fn fetch_document(&self, url: Url) -> Result<String, BbsError> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.text_with_charset(PAGE_CHARSET).await?)
    }

    async fn submit_form(
        &self,
        path: &'static str,
        form: &HashMap<String, String>,
    ) -> Result<String, BbsError> {
        let url = self
            .base
            .join(path)
            .map_err(|err| BbsError::Parse(format!("bad endpoint {path}: {err}")))?;
        let response = self.http.post(url).form(form).send().await?.error_for_status()?;
        Ok(response.text_with_charset(PAGE_CHARSET).await?)
    }
}

// Mutation endpoints answer HTTP 200 even when the action logically failed;
// the only success signal is a literal marker in the response body.
fn interpret_response(body: &str, marker: &str, action: &'static str) -> Result<(), BbsError> {
    if body.contains(marker) {
        Ok(())
    } else {
        Err(BbsError::Rejected { action })
    }
}

#[async_trait]
impl RemoteActions for BbsSession {
    async fn delete_post(
        &self,
        args: &DeleteArgs,
        delform: &HashMap<String, String>,
    ) -> Result<(), BbsError> {
        let mut form = delform.clone();
        form.insert("file".to_string(), args.file.clone());
        form.insert("id".to_string(), args.id.clone());
        form.insert("dingflag".to_string(), args.ding_flag.clone());

        let body = self.submit_form(DELETE_PATH, &form).await?;
        interpret_response(&body, DELETE_OK_MARKER, "delete")
    }

    async fn replace_body(&self, edit_link: &str, new_body: &str) -> Result<(), BbsError> {
        let form_url = self.resolve(edit_link)?;
        let document = self.fetch_document(form_url).await?;
        let mut fields = parse::parse_edit_form(&document)?;
        fields.insert("text".to_string(), new_body.to_string());

        let body = self.submit_form(EDIT_SUBMIT_PATH, &fields).await?;
        interpret_response(&body, EDIT_OK_MARKER, "edit")
    }

    async fn send_notice(&self, author: &str, title: &str, body: &str) -> Result<(), BbsError> {
        let mut form = HashMap::new();
        form.insert("userid".to_string(), author.to_string());
        form.insert("title".to_string(), title.to_string());
        form.insert("text".to_string(), body.to_string());

        let response = self.submit_form(MAIL_PATH, &form).await?;
        interpret_response(&response, MAIL_OK_MARKER, "notice")
    }
}
