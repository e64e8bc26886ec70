use crate::{
    domain::{Decision, PostRole, ThreadPost},
    policy::{blocklist::Blocklist, quote::QuoteSplitter},
};

/// Decides what to do with one post. Pure: same post and policy always yield
/// the same decision; all side effects belong to the executor.
///
/// A main post is deleted or kept outright. A reply is only deleted when the
/// offending words survive in the author's own text; a hit that comes purely
/// from quoted material is remediated by rewriting the reply down to its own
/// text. A main post has no quoting predecessor, so it is never edited.
pub fn classify(post: &ThreadPost, blocklist: &Blocklist, splitter: &QuoteSplitter) -> Decision {
    match post.role {
        PostRole::Main => match blocklist.first_match(&post.body) {
            Some(term) => Decision::Delete {
                term: term.to_string(),
            },
            None => Decision::Keep,
        },
        PostRole::Reply => {
            let Some(term) = blocklist.first_match(&post.body) else {
                return Decision::Keep;
            };
            let split = splitter.split(&post.body);
            match blocklist.first_match(&split.own_text) {
                Some(own_term) => Decision::Delete {
                    term: own_term.to_string(),
                },
                None => Decision::Edit {
                    new_body: split.own_text,
                    term: term.to_string(),
                },
            }
        }
    }
}
