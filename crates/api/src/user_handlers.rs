use std::sync::Arc;

use auth::{AuthError, ProfileUpdate};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::AppState;
use crate::middleware::AuthUser;
use crate::response::{MessageResponse, SearchResponse, UserView, ValidationResponse};
use crate::validate::{self, Violation};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UpdateRequest {
    fn validate(self) -> Result<ProfileUpdate, Vec<Violation>> {
        let mut violations = Vec::new();
        let update = ProfileUpdate {
            password: self
                .password
                .map(|p| validate::password(&p, &mut violations)),
            first_name: self
                .first_name
                .map(|n| validate::name("firstName", &n, &mut violations)),
            last_name: self
                .last_name
                .map(|n| validate::name("lastName", &n, &mut violations)),
        };

        if violations.is_empty() {
            Ok(update)
        } else {
            Err(violations)
        }
    }
}

/// PUT /api/v1/user — partial profile update for the bearer-authenticated
/// user. An empty payload is a successful no-op as long as the identity key
/// still exists.
pub async fn update_user(
    AuthUser(user_id): AuthUser,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateRequest>,
) -> impl IntoResponse {
    let update = match payload.validate() {
        Ok(update) => update,
        Err(errors) => {
            tracing::warn!("profile update rejected: invalid input: {errors:?}");
            return (
                StatusCode::BAD_REQUEST,
                Json(ValidationResponse {
                    message: "Validation failed",
                    errors,
                }),
            )
                .into_response();
        }
    };

    match state.auth_service.update_profile(&user_id, update).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "User information updated successfully",
            }),
        )
            .into_response(),
        Err(AuthError::NotFoundOrNoop) => (
            StatusCode::NOT_FOUND,
            Json(MessageResponse {
                message: "User not found or no changes made",
            }),
        )
            .into_response(),
        Err(AuthError::Hashing(e)) => {
            tracing::error!("profile update failed hashing new password: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse {
                    message: "Error hashing password",
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("profile update failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse {
                    message: "Error while updating user information",
                }),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub filter: String,
}

/// GET /api/v1/user/bulk — substring search over first and last names.
/// Unauthenticated and unpaginated, matching the historical surface.
pub async fn search_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    match state.users.search_by_name(&params.filter).await {
        Ok(users) => (
            StatusCode::OK,
            Json(SearchResponse {
                user: users.into_iter().map(UserView::from).collect(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("user search failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse {
                    message: "Internal server error",
                }),
            )
                .into_response()
        }
    }
}
