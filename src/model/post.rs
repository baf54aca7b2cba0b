use serde::{Deserialize, Serialize};

use super::Record;
use crate::error::ValidationError;

/// A post. `author_id` is not checked against the user store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub username: String,
    pub title: String,
    pub content: String,
    pub author_id: i64,
}

impl Post {
    pub fn new(
        id: i64,
        username: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: i64,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            title: title.into(),
            content: content.into(),
            author_id,
        }
    }
}

/// Partial update for a stored post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub username: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_id: Option<i64>,
}

impl Record for Post {
    type Patch = PostPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn apply(&mut self, patch: PostPatch) -> Result<(), ValidationError> {
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(author_id) = patch.author_id {
            self.author_id = author_id;
        }
        Ok(())
    }
}
