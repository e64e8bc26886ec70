/// Separates a reply body into the author's own text and the material quoted
/// from an earlier post.
///
/// The board renders quotes after a fixed attribution phrase ("…的大作中提到").
/// Own text is rebuilt as everything before that phrase with the phrase and its
/// closing bracket re-appended, so the attribution line stays well-formed after
/// the quote is dropped. The first line of a body is the site header, never
/// user-authored, so it is stripped before the own text is used anywhere.
pub struct QuoteSplitter {
    marker: String,
    closing: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteSplit {
    pub own_text: String,
    pub quoted_text: String,
}

impl QuoteSplitter {
    pub fn new(marker: impl Into<String>, closing: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            closing: closing.into(),
        }
    }

    pub fn split(&self, raw: &str) -> QuoteSplit {
        let Some(idx) = raw.find(&self.marker) else {
            return QuoteSplit {
                own_text: raw.to_string(),
                quoted_text: String::new(),
            };
        };

        let mut own = String::with_capacity(idx + self.marker.len() + self.closing.len());
        own.push_str(&raw[..idx]);
        own.push_str(&self.marker);
        own.push_str(&self.closing);

        QuoteSplit {
            own_text: drop_header_line(&own),
            quoted_text: raw[idx + self.marker.len()..].to_string(),
        }
    }
}

fn drop_header_line(text: &str) -> String {
    match text.find('\n') {
        Some(pos) => text[pos + 1..].to_string(),
        None => String::new(),
    }
}
