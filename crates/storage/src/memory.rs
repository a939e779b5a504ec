use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::model::{AccountRecord, UserPatch, UserRecord, UserSummary};
use crate::repository::AccountRepository;
use crate::{Result, StoreError};

/// In-memory repository with the same observable contract as the Mongo
/// backend. The uniqueness check and the insert of `create_user` happen
/// inside one write-lock critical section, so two concurrent signups for the
/// same username cannot both succeed.
#[derive(Default)]
pub struct MemoryAccountRepository {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Vec<UserRecord>,
    accounts: Vec<AccountRecord>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All accounts linked to the given identity key, in creation order.
    pub async fn accounts_for(&self, user_id: &str) -> Vec<AccountRecord> {
        self.inner
            .read()
            .await
            .accounts
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, user: UserRecord) -> Result<UserRecord> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::DuplicateUsername);
        }
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn create_account(&self, user_id: &str, balance: f64) -> Result<AccountRecord> {
        let account = AccountRecord::new(user_id.to_string(), balance);
        self.inner.write().await.accounts.push(account.clone());
        Ok(account)
    }

    async fn update_user(&self, user_id: &str, patch: UserPatch) -> Result<u64> {
        let mut inner = self.inner.write().await;
        let Some(user) = inner.users.iter_mut().find(|u| u.id == user_id) else {
            return Ok(0);
        };
        if patch.is_empty() {
            return Ok(1);
        }
        if let Some(hash) = patch.password_hash {
            user.password_hash = hash;
        }
        if let Some(first) = patch.first_name {
            user.first_name = first;
        }
        if let Some(last) = patch.last_name {
            user.last_name = last;
        }
        user.updated_at = Utc::now();
        Ok(1)
    }

    async fn search_by_name(&self, pattern: &str) -> Result<Vec<UserSummary>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .filter(|u| u.first_name.contains(pattern) || u.last_name.contains(pattern))
            .map(UserSummary::from)
            .collect())
    }
}
