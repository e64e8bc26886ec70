/// Position of a post within its thread. The first post carries the article;
/// everything after it is a reply and may quote earlier posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostRole {
    Main,
    Reply,
}

/// The three onclick arguments of a post's delete button. Opaque to the
/// classifier; only the delete endpoint interprets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteArgs {
    pub file: String,
    pub id: String,
    pub ding_flag: String,
}

#[derive(Debug, Clone)]
pub struct ThreadPost {
    pub role: PostRole,
    pub author: String,
    pub body: String,
    pub delete_args: DeleteArgs,
    pub edit_link: Option<String>,
}

/// One entry on a board or club listing page.
#[derive(Debug, Clone)]
pub struct ThreadLink {
    pub title: String,
    pub href: String,
}
