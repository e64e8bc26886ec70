use std::{collections::HashSet, fs, path::Path};

use anyhow::{Context, Result};

/// Ordered list of lowercase terms. Matching is literal, case-insensitive
/// substring search; the first term in original list order wins.
pub struct Blocklist {
    terms: Vec<String>,
}

impl Blocklist {
    /// Loads one term per line. An unreadable file is fatal: without a policy
    /// there is nothing to scan for.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read blocklist {}", path.display()))?;
        Ok(Self::from_lines(raw.lines()))
    }

    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut terms = Vec::new();
        for line in lines {
            let term = line.trim().to_lowercase();
            if term.is_empty() || !seen.insert(term.clone()) {
                continue;
            }
            terms.push(term);
        }
        Self { terms }
    }

    pub fn first_match(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.terms
            .iter()
            .find(|term| lowered.contains(term.as_str()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
