// src/domain/blog.rs

use serde::{Deserialize, Serialize};

use crate::domain::tag::Tag;

/// A blog row plus, when loaded through a single-blog lookup, its tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    /// Store-generated identifier, 0 until inserted
    pub id: i64,

    pub title: String,

    pub url: String,

    /// Only populated by a lookup by id; list queries leave it empty
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Blog {
    /// Create an unsaved Blog
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            url: url.into(),
            tags: Vec::new(),
        }
    }

    pub fn has_tag(&self, tag_id: i64) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }
}

impl std::fmt::Display for Blog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.url)
    }
}
