use std::sync::Arc;

use api::{AppState, router};
use auth::{AuthService, TokenSigner};
use common::AppConfig;
use storage::{AccountRepository, MongoAccountRepository};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;

    let repo = MongoAccountRepository::connect(&config.database.url, &config.database.name).await?;
    // The unique username index is the uniqueness source of truth; it must
    // exist before the first signup is accepted.
    repo.ensure_indexes().await?;
    tracing::info!("connected to MongoDB database {}", config.database.name);

    let repo: Arc<dyn AccountRepository> = Arc::new(repo);
    let auth_service = AuthService::new(repo.clone(), TokenSigner::new(&config.auth.jwt_secret));
    let state = Arc::new(AppState::new(auth_service, repo));

    let app = router::router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
