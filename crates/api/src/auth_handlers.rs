use std::sync::Arc;

use auth::{AuthError, NewUser};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use crate::AppState;
use crate::response::{MessageResponse, TokenResponse};
use crate::validate::{self, Violation};

/// Shared vague message for rejected signups and malformed signins: a caller
/// probing for registered addresses learns nothing from the reply. Logs
/// carry the real reason.
const VAGUE_REJECTION: &str = "Email already taken / Incorrect inputs";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl SignupRequest {
    fn validate(self) -> Result<NewUser, Vec<Violation>> {
        let mut violations = Vec::new();
        let username = validate::username(&self.username, &mut violations);
        let password = validate::password(&self.password, &mut violations);
        let first_name = validate::name("firstName", &self.first_name, &mut violations);
        let last_name = validate::name("lastName", &self.last_name, &mut violations);

        if violations.is_empty() {
            Ok(NewUser {
                username,
                password,
                first_name,
                last_name,
            })
        } else {
            Err(violations)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

impl SigninRequest {
    fn validate(self) -> Result<(String, String), Vec<Violation>> {
        let mut violations = Vec::new();
        let username = validate::username(&self.username, &mut violations);
        let password = validate::password(&self.password, &mut violations);

        if violations.is_empty() {
            Ok((username, password))
        } else {
            Err(violations)
        }
    }
}

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> impl IntoResponse {
    let new_user = match payload.validate() {
        Ok(new_user) => new_user,
        Err(violations) => {
            tracing::warn!("signup rejected: invalid input: {violations:?}");
            return vague_rejection();
        }
    };

    match state.auth_service.signup(new_user).await {
        Ok(token) => (
            StatusCode::OK,
            Json(TokenResponse {
                message: "User created successfully",
                token,
            }),
        )
            .into_response(),
        Err(AuthError::DuplicateUsername) => {
            tracing::warn!("signup rejected: username already taken");
            vague_rejection()
        }
        Err(e) => {
            tracing::error!("signup failed: {e}");
            internal_error()
        }
    }
}

pub async fn signin(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SigninRequest>,
) -> impl IntoResponse {
    let (username, password) = match payload.validate() {
        Ok(credentials) => credentials,
        Err(violations) => {
            tracing::warn!("signin rejected: invalid input: {violations:?}");
            return vague_rejection();
        }
    };

    match state.auth_service.signin(&username, &password).await {
        Ok(token) => (
            StatusCode::OK,
            Json(TokenResponse {
                message: "User logged in successfully",
                token,
            }),
        )
            .into_response(),
        Err(AuthError::UserNotFound) => {
            tracing::warn!("signin rejected: unknown username {username}");
            (
                StatusCode::NOT_FOUND,
                Json(MessageResponse {
                    message: "User not found",
                }),
            )
                .into_response()
        }
        Err(AuthError::BadCredential) => {
            tracing::warn!("signin rejected: wrong password for {username}");
            (
                StatusCode::UNAUTHORIZED,
                Json(MessageResponse {
                    message: "Incorrect password",
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("signin failed: {e}");
            internal_error()
        }
    }
}

fn vague_rejection() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(MessageResponse {
            message: VAGUE_REJECTION,
        }),
    )
        .into_response()
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(MessageResponse {
            message: "Internal server error",
        }),
    )
        .into_response()
}
