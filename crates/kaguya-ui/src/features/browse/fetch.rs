//! Page fetch collaborator and its error type.

use std::fmt;

use async_trait::async_trait;
use kaguya_api_models::Page;
use thiserror::Error;

use crate::features::browse::filters::BrowseQuery;

/// Broad cause of a failed page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    /// The request never produced a response.
    Transport,
    /// The server answered with a non-success status.
    Status,
    /// The body could not be decoded.
    Decode,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Transport => "transport",
            Self::Status => "status",
            Self::Decode => "decode",
        })
    }
}

/// A page could not be fetched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("page fetch failed ({kind}): {message}")]
pub struct FetchError {
    /// Broad cause.
    pub kind: FetchErrorKind,
    /// HTTP status when the server answered.
    pub status: Option<u16>,
    /// Human-readable detail.
    pub message: String,
}

impl FetchError {
    /// Request failed before a response arrived.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Transport,
            status: None,
            message: message.into(),
        }
    }

    /// Server rejected the request.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Status,
            status: Some(status),
            message: message.into(),
        }
    }

    /// Response body was malformed.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Decode,
            status: None,
            message: message.into(),
        }
    }
}

/// Transport that loads one page of browse results.
///
/// Futures are not required to be `Send`; the browser host is single-threaded.
#[async_trait(?Send)]
pub trait PageFetcher<T> {
    /// Fetch page `page` (one-based) for `query`.
    ///
    /// # Errors
    /// Returns [`FetchError`] when the page cannot be loaded.
    async fn fetch_page(&self, query: &BrowseQuery, page: u32) -> Result<Page<T>, FetchError>;
}
