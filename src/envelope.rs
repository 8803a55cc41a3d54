//! JSON envelope wrapping every API response.

use serde::{Deserialize, Serialize};

use crate::pagination::PaginationMeta;

/// `{ success, data?, pagination?, message? }` as produced by the API and
/// consumed by the list controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            pagination: None,
            message: None,
        }
    }

    pub fn page(data: T, pagination: PaginationMeta) -> Self {
        Self {
            success: true,
            data: Some(data),
            pagination: Some(pagination),
            message: None,
        }
    }

    /// Attaches a human readable message to a successful response.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Success without a payload, e.g. after a delete.
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            pagination: None,
            message: Some(message.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            pagination: None,
            message: Some(message.into()),
        }
    }
}
