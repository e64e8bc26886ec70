use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::ThreadPost;

/// Writes one JSON file per removed post so deletions can be audited or
/// restored by hand later.
#[derive(Debug, Clone)]
pub struct ArchiveWriter {
    dir: PathBuf,
}

#[derive(Debug, Serialize)]
struct RemovalRecord<'a> {
    author: &'a str,
    title: &'a str,
    matched_term: &'a str,
    body: &'a str,
    removed_at: DateTime<Utc>,
}

impl ArchiveWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub async fn save(&self, post: &ThreadPost, title: &str, term: &str) -> Result<PathBuf> {
        let removed_at = Utc::now();
        let record = RemovalRecord {
            author: &post.author,
            title,
            matched_term: term,
            body: &post.body,
            removed_at,
        };

        let filename = format!(
            "{}_{}.json",
            sanitize(&post.author),
            removed_at.format("%Y%m%d_%H%M%S%3f")
        );
        let path = self.dir.join(filename);
        let payload = serde_json::to_vec_pretty(&record)?;
        tokio::fs::write(&path, payload)
            .await
            .with_context(|| format!("failed to write removal record {}", path.display()))?;
        Ok(path)
    }
}

fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::domain::{DeleteArgs, PostRole};

    #[tokio::test]
    async fn record_round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let writer = ArchiveWriter::new(dir.path().to_path_buf());
        let post = ThreadPost {
            role: PostRole::Reply,
            author: "bob".to_string(),
            body: "发信站: BBS\noffending text".to_string(),
            delete_args: DeleteArgs {
                file: "Test".to_string(),
                id: "9".to_string(),
                ding_flag: "0".to_string(),
            },
            edit_link: None,
        };

        let path = writer.save(&post, "some thread", "spam").await.unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["author"], "bob");
        assert_eq!(value["title"], "some thread");
        assert_eq!(value["matched_term"], "spam");
        assert!(value["body"].as_str().unwrap().contains("offending text"));
    }

    #[test]
    fn filenames_stay_plain() {
        assert_eq!(sanitize("bob"), "bob");
        assert_eq!(sanitize("../../etc"), "______etc");
        assert_eq!(sanitize(""), "unknown");
    }
}
