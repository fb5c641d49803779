//! Emotion keyword maps and tag scanning
//!
//! Model dialogue text may carry inline tags like `[joy]` that select an
//! expression preset. The map ties each keyword to an expression index;
//! scanning extracts the indices and strips the tags from display text.

use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Keyword-to-expression-index map with case-insensitive tag matching
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmotionMap {
    tags: BTreeMap<String, usize>,
}

impl EmotionMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyword; keys are stored lowercased
    pub fn insert(&mut self, keyword: impl Into<String>, index: usize) {
        self.tags.insert(keyword.into().to_lowercase(), index);
    }

    /// Look up a keyword, ignoring ASCII case
    pub fn get(&self, keyword: &str) -> Option<usize> {
        self.tags.get(&keyword.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate keywords in sorted order
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    /// A display string of all tags, e.g. `[joy], [anger],`
    pub fn tag_list(&self) -> String {
        self.keywords()
            .map(|k| format!("[{k}],"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Extract expression indices from `[keyword]` tags, in order of appearance
    pub fn extract(&self, text: &str) -> Vec<usize> {
        let mut found = Vec::new();
        let mut pos = 0;
        while pos < text.len() {
            if let Some((tag_len, index)) = self.tag_match_at(text, pos) {
                found.push(index);
                pos += tag_len;
            } else {
                pos += char_len_at(text, pos);
            }
        }
        found
    }

    /// Remove all `[keyword]` tags, leaving the surrounding text untouched
    pub fn strip(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        while pos < text.len() {
            if let Some((tag_len, _)) = self.tag_match_at(text, pos) {
                pos += tag_len;
            } else {
                let len = char_len_at(text, pos);
                out.push_str(&text[pos..pos + len]);
                pos += len;
            }
        }
        out
    }

    /// Match a tag starting at byte `pos`; returns (tag byte length, index).
    /// Overlapping candidates resolve to the longest keyword.
    fn tag_match_at(&self, text: &str, pos: usize) -> Option<(usize, usize)> {
        let rest = &text[pos..];
        if !rest.starts_with('[') {
            return None;
        }
        let mut best: Option<(usize, usize)> = None;
        for (keyword, &index) in &self.tags {
            let tag_len = keyword.len() + 2;
            let Some(candidate) = rest.get(..tag_len) else {
                continue;
            };
            if candidate.as_bytes()[tag_len - 1] != b']' {
                continue;
            }
            if !candidate[1..tag_len - 1].eq_ignore_ascii_case(keyword) {
                continue;
            }
            if best.is_none_or(|(len, _)| tag_len > len) {
                best = Some((tag_len, index));
            }
        }
        best
    }
}

impl FromIterator<(String, usize)> for EmotionMap {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (keyword, index) in iter {
            map.insert(keyword, index);
        }
        map
    }
}

impl Serialize for EmotionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tags.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EmotionMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, usize>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

/// Byte length of the char starting at `pos` (must be a char boundary)
fn char_len_at(text: &str, pos: usize) -> usize {
    text[pos..].chars().next().map_or(1, char::len_utf8)
}
