use std::sync::Arc;

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::AppState;
use crate::response::MessageResponse;

/// Identity key proven by the bearer token; inserted into request
/// extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

/// Middleware requiring a valid `Authorization: Bearer` token.
///
/// On success the verified identity key is stored in request extensions for
/// the [`AuthUser`] extractor; every failure mode answers 401 without
/// revealing whether the token was missing, malformed or tampered with.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| unauthorized("Missing or invalid Authorization header"))?;

    let user_id = state
        .auth_service
        .verify_token(token)
        .map_err(|_| unauthorized("Invalid token"))?;

    request.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(request).await)
}

fn unauthorized(message: &'static str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(MessageResponse { message })).into_response()
}

/// Extractor for the authenticated identity key.
/// Use in handlers behind [`require_auth`].
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| unauthorized("User not authenticated"))
    }
}
