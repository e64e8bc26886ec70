use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::domain::{DeleteArgs, PostRole, ThreadLink, ThreadPost};

use super::BbsError;

// Display bodies start at the site header line; everything before it is the
// title block repeated by the page layout.
const BODY_START_MARKER: &str = "发信站";
const DELETE_ANCHOR_TEXT: &str = "删除";
const EDIT_ANCHOR_TEXT: &str = "修改";

static ONCLICK_ARGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]*)\)").expect("valid onclick regex"));

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid selector"));
static POST_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td.wenzhang_bg").expect("valid selector"));
static BODY_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td.jiawenzhang-type").expect("valid selector"));
static BOARD_COLUMN: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td.taolun_leftright").expect("valid selector"));
static BOARD_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.news1").expect("valid selector"));
static CLUB_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href*="clubarticle"]"#).expect("valid selector"));
static DELFORM: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"form[name="delform"]"#).expect("valid selector"));
static EDIT_FORM: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"form[name="form1"]"#).expect("valid selector"));
static INPUT: Lazy<Selector> = Lazy::new(|| Selector::parse("input").expect("valid selector"));

/// Board listing pages and club listing pages carry their thread links in
/// different markup; the URL shape tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    Board,
    Club,
}

impl ListingKind {
    pub fn from_url(url: &str) -> Self {
        if url.contains("club_bbsdoc") {
            Self::Club
        } else {
            Self::Board
        }
    }
}

/// One thread page: posts in display order (index 0 is the main post), each
/// independently parsed so a broken row never hides its neighbors, plus the
/// hidden fields of the page-level delete form.
#[derive(Debug)]
pub struct ThreadPage {
    pub posts: Vec<Result<ThreadPost, BbsError>>,
    pub delform: HashMap<String, String>,
}

pub fn parse_listing(html: &str, kind: ListingKind) -> Result<Vec<ThreadLink>, BbsError> {
    let document = Html::parse_document(html);
    let anchors: Vec<ElementRef> = match kind {
        ListingKind::Club => document.select(&CLUB_LINK).collect(),
        ListingKind::Board => {
            let column = document
                .select(&BOARD_COLUMN)
                .next()
                .ok_or_else(|| BbsError::Parse("listing page has no thread column".to_string()))?;
            column.select(&BOARD_LINK).collect()
        }
    };

    Ok(anchors
        .into_iter()
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?.to_string();
            Some(ThreadLink {
                title: collect_text(anchor),
                href,
            })
        })
        .collect())
}

pub fn parse_thread(html: &str) -> Result<ThreadPage, BbsError> {
    let document = Html::parse_document(html);

    let delform_el = document
        .select(&DELFORM)
        .next()
        .ok_or_else(|| BbsError::Parse("thread page has no delete form".to_string()))?;
    let delform = input_fields(delform_el);

    let posts = document
        .select(&POST_CELL)
        .enumerate()
        .map(|(index, cell)| parse_post(index, cell))
        .collect();

    Ok(ThreadPage { posts, delform })
}

pub fn parse_edit_form(html: &str) -> Result<HashMap<String, String>, BbsError> {
    let document = Html::parse_document(html);
    let form = document
        .select(&EDIT_FORM)
        .next()
        .ok_or_else(|| BbsError::Parse("edit page has no form1".to_string()))?;
    Ok(input_fields(form))
}

fn parse_post(index: usize, cell: ElementRef) -> Result<ThreadPost, BbsError> {
    let row = cell
        .parent()
        .and_then(ElementRef::wrap)
        .ok_or_else(|| BbsError::Parse(format!("post {index} has no containing row")))?;

    let author = row
        .select(&ANCHOR)
        .next()
        .map(collect_text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| BbsError::Parse(format!("post {index} has no author")))?;

    let body_cell = row
        .select(&BODY_CELL)
        .next()
        .ok_or_else(|| BbsError::Parse(format!("post {index} has no body")))?;
    let body = clean_body(&body_cell.text().collect::<String>());

    let delete_anchor = find_anchor(row, DELETE_ANCHOR_TEXT)
        .ok_or_else(|| BbsError::Parse(format!("post {index} has no delete control")))?;
    let onclick = delete_anchor
        .value()
        .attr("onclick")
        .ok_or_else(|| BbsError::Parse(format!("post {index} delete control has no onclick")))?;
    let delete_args = parse_delete_args(onclick).ok_or_else(|| {
        BbsError::Parse(format!("post {index} delete arguments unreadable: {onclick}"))
    })?;

    let edit_link = find_anchor(row, EDIT_ANCHOR_TEXT)
        .and_then(|anchor| anchor.value().attr("href"))
        .map(str::to_string);

    Ok(ThreadPost {
        role: if index == 0 {
            PostRole::Main
        } else {
            PostRole::Reply
        },
        author,
        body,
        delete_args,
        edit_link,
    })
}

fn input_fields(form: ElementRef) -> HashMap<String, String> {
    form.select(&INPUT)
        .filter_map(|input| {
            let name = input.value().attr("name")?.to_string();
            let value = input.value().attr("value").unwrap_or_default().to_string();
            Some((name, value))
        })
        .collect()
}

fn find_anchor<'a>(row: ElementRef<'a>, label: &str) -> Option<ElementRef<'a>> {
    row.select(&ANCHOR).find(|anchor| collect_text(*anchor) == label)
}

fn parse_delete_args(onclick: &str) -> Option<DeleteArgs> {
    let captured = ONCLICK_ARGS.captures(onclick)?.get(1)?.as_str();
    let parts: Vec<&str> = captured
        .split(',')
        .map(|part| part.trim().trim_matches(|ch| ch == '\'' || ch == '"'))
        .collect();
    match parts.as_slice() {
        [file, id, ding_flag] if !file.is_empty() => Some(DeleteArgs {
            file: file.to_string(),
            id: id.to_string(),
            ding_flag: ding_flag.to_string(),
        }),
        _ => None,
    }
}

fn clean_body(text: &str) -> String {
    match text.find(BODY_START_MARKER) {
        Some(idx) => text[idx..].to_string(),
        None => text.to_string(),
    }
}

fn collect_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
