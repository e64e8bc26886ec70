/// What to do with one post. `term` is the blocklist entry that triggered the
/// action, kept for prompts, logs, and the removal archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Keep,
    Edit { new_body: String, term: String },
    Delete { term: String },
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Keep => "keep",
            Decision::Edit { .. } => "edit",
            Decision::Delete { .. } => "delete",
        }
    }
}
