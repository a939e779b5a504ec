use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::{AppState, auth_handlers, middleware as auth_middleware, user_handlers};

pub fn router(state: Arc<AppState>) -> Router {
    // Public routes (no authentication required); search is deliberately
    // open, matching the historical surface.
    let public_routes = Router::new()
        .route("/", get(|| async { "Walletkit API running" }))
        .route("/api/v1/user/signup", post(auth_handlers::signup))
        .route("/api/v1/user/signin", post(auth_handlers::signin))
        .route("/api/v1/user/bulk", get(user_handlers::search_users));

    // Routes that require a verified bearer token.
    let protected_routes = Router::new()
        .route("/api/v1/user", put(user_handlers::update_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
