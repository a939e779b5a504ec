//! Response payloads shared across handlers.

use serde::Serialize;
use storage::UserSummary;

use crate::validate::Violation;

/// Plain `{message}` body used by most failure paths and by update success.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `{message, token}` body returned by signup and signin.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub message: &'static str,
    pub token: String,
}

/// `{message, errors}` body for schema-validation failures on update.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub message: &'static str,
    pub errors: Vec<Violation>,
}

/// `{user: [...]}` envelope for search results. The singular key is
/// historical API surface and kept as-is.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub user: Vec<UserView>,
}

/// Outward projection of a user; carries no credential material.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub id: String,
}

impl From<UserSummary> for UserView {
    fn from(summary: UserSummary) -> Self {
        Self {
            username: summary.username,
            first_name: summary.first_name,
            last_name: summary.last_name,
            id: summary.id,
        }
    }
}
