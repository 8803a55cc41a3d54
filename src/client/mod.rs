//! Dashboard-side list controller and the HTTP client it talks through.

use thiserror::Error;

use crate::query::QueryError;

pub mod api;
pub mod controller;
pub mod session;

pub use api::{HttpListApi, ListApi};
pub use controller::{
    EmptyState, FetchTicket, ListController, Notice, NoticeLevel, Outcome, Trigger, ViewStatus,
};
pub use session::{MemoryTokenStore, TokenStore};

/// Where the dashboard sends users without a usable session.
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("session expired")]
    Unauthorized,

    #[error(transparent)]
    Query(#[from] QueryError),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
