use std::sync::Arc;

use rand::Rng;
use storage::{AccountRepository, StoreError, UserPatch, UserRecord};

use crate::error::{AuthError, Result};
use crate::jwt::TokenSigner;
use crate::password::{hash_password, verify_password};

/// A shape-validated, normalized signup request.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// A shape-validated partial profile update. `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Registration and authentication workflow.
///
/// Inputs arrive already validated and normalized by the API layer; this
/// service owns the ordering of lookups, hashing, persistence and token
/// issuance, and reports domain failures as [`AuthError`] kinds.
pub struct AuthService {
    repo: Arc<dyn AccountRepository>,
    tokens: TokenSigner,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AccountRepository>, tokens: TokenSigner) -> Self {
        Self { repo, tokens }
    }

    /// Register a new user plus its linked balance account and return a
    /// session token for the fresh identity key.
    ///
    /// The username lookup up front is only a fast path for a friendlier
    /// failure; the repository's uniqueness constraint is what actually
    /// closes the race between two concurrent signups.
    pub async fn signup(&self, new_user: NewUser) -> Result<String> {
        if self.repo.find_by_username(&new_user.username).await?.is_some() {
            return Err(AuthError::DuplicateUsername);
        }

        let password_hash = hash_password(&new_user.password)?;
        let record = UserRecord::new(
            new_user.username,
            password_hash,
            new_user.first_name,
            new_user.last_name,
        );

        let user = match self.repo.create_user(record).await {
            Ok(user) => user,
            Err(StoreError::DuplicateUsername) => return Err(AuthError::DuplicateUsername),
            Err(e) => return Err(e.into()),
        };

        let balance = rand::thread_rng().gen_range(1.0..10_001.0);
        self.repo.create_account(&user.id, balance).await?;

        self.tokens.issue(&user.id)
    }

    /// Verify a credential pair and return a fresh session token.
    pub async fn signin(&self, username: &str, password: &str) -> Result<String> {
        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::BadCredential);
        }

        self.tokens.issue(&user.id)
    }

    /// Apply a sparse profile update for the authenticated user. A new
    /// password is hashed before it reaches the repository.
    pub async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<()> {
        let patch = UserPatch {
            password_hash: update.password.as_deref().map(hash_password).transpose()?,
            first_name: update.first_name,
            last_name: update.last_name,
        };

        if self.repo.update_user(user_id, patch).await? == 0 {
            return Err(AuthError::NotFoundOrNoop);
        }
        Ok(())
    }

    /// Validate a bearer token and return the identity key it proves.
    pub fn verify_token(&self, token: &str) -> Result<String> {
        self.tokens.verify(token)
    }
}
