use async_trait::async_trait;

use crate::Result;
use crate::model::{AccountRecord, UserPatch, UserRecord, UserSummary};

/// Persistence contract for users and their linked balance accounts.
///
/// Username uniqueness is this layer's invariant: `create_user` checks and
/// inserts atomically, independent of any lookup the caller may have done
/// beforehand. Callers treat their own pre-check purely as a fast path.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Exact-match lookup on the normalized login identifier.
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>>;

    /// Insert a new user, failing with [`crate::StoreError::DuplicateUsername`]
    /// when the login identifier is already taken.
    async fn create_user(&self, user: UserRecord) -> Result<UserRecord>;

    /// Create the single balance account linked to `user_id`.
    async fn create_account(&self, user_id: &str, balance: f64) -> Result<AccountRecord>;

    /// Apply a sparse update to the user with the given identity key.
    ///
    /// Returns the number of users matched: 0 means the identity key does not
    /// exist. An empty patch counts a matching user without touching it, so a
    /// no-op update on an existing user still reports 1.
    async fn update_user(&self, user_id: &str, patch: UserPatch) -> Result<u64>;

    /// Substring match over first or last name (case-sensitive); an empty
    /// pattern matches every user.
    async fn search_by_name(&self, pattern: &str) -> Result<Vec<UserSummary>>;
}
