use std::sync::Arc;

use auth::AuthService;
use storage::AccountRepository;

/// Application state shared across all handlers.
pub struct AppState {
    pub auth_service: AuthService,
    pub users: Arc<dyn AccountRepository>,
}

impl AppState {
    pub fn new(auth_service: AuthService, users: Arc<dyn AccountRepository>) -> Self {
        Self {
            auth_service,
            users,
        }
    }
}
