//! Blog with moderated comments.

use serde::{Deserialize, Serialize};

use crate::input::{self, ValidationError};

mod moderation;
mod post;
mod posts;

pub use self::{moderation::*, post::*, posts::*};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created_at: Option<String>,
}

/// A comment on a post. Only approved comments are ever shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author: String,
    pub body: String,
    pub created_at: Option<String>,
    /// Missing means published: the comments endpoint only lists approved ones.
    #[serde(default = "published")]
    pub approved: bool,
}

const fn published() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingComment {
    pub id: i64,
    pub post_id: i64,
    pub post_title: String,
    pub author: String,
    pub body: String,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComment {
    pub author: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub body: String,
}

impl PostForm {
    pub fn parse(&self) -> Result<NewPost, ValidationError> {
        Ok(NewPost {
            title: input::required_text("Title", &self.title)?,
            body: input::required_text("Content", &self.body)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentForm {
    pub author: String,
    pub body: String,
}

impl CommentForm {
    pub fn parse(&self) -> Result<NewComment, ValidationError> {
        Ok(NewComment {
            author: input::required_text("Author", &self.author)?,
            body: input::required_text("Comment", &self.body)?,
        })
    }
}
