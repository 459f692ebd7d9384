// src/domain/post.rs
//
// Post entity. Posts belong to exactly one blog and must be removed
// before that blog can be.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Store-generated identifier, 0 until inserted
    pub id: i64,

    pub title: String,

    pub url: String,

    /// Publication timestamp, persisted as RFC 3339 text
    pub publish_date_time: DateTime<Utc>,

    /// Owning blog
    pub blog_id: i64,
}

impl Post {
    /// Create an unsaved Post published now
    pub fn new(title: impl Into<String>, url: impl Into<String>, blog_id: i64) -> Self {
        Self {
            id: 0,
            title: title.into(),
            url: url.into(),
            publish_date_time: Utc::now(),
            blog_id,
        }
    }
}

impl std::fmt::Display for Post {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.url)
    }
}
