//! Resource client for the JSON-over-HTTP backends.

use thiserror::Error;

mod client;
mod http;
mod transport;

pub use self::{client::*, http::*, transport::*};

pub type Result<T> = std::result::Result<T, Error>;

/// Body type for endpoints whose response content is irrelevant.
pub type Ack = serde::de::IgnoredAny;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The server answered with a status outside the success range.
    #[error("request rejected with status {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    RemoteRejection { status: u16, detail: Option<String> },

    /// The request could not be completed or its response was unusable.
    #[error("{0}")]
    Transport(String),
}

impl Error {
    /// The text to show to the user.
    ///
    /// Rejections carry the server's `detail` if there was one; everything
    /// else falls back to the caller's generic message.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::RemoteRejection {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_owned(),
        }
    }

    /// `409 Conflict`, e.g. a duplicate unique key.
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::RemoteRejection { status: 409, .. })
    }

    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteRejection { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}
