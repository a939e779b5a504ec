pub mod auth_handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;
pub mod user_handlers;
pub mod validate;

pub use state::AppState;
