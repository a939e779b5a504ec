use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};

use crate::model::{AccountRecord, UserPatch, UserRecord, UserSummary};
use crate::repository::AccountRepository;
use crate::{Result, StoreError};

/// MongoDB-backed repository.
///
/// The unique index on `users.username` is the source of truth for login
/// uniqueness; [`MongoAccountRepository::ensure_indexes`] must run before the
/// service takes traffic.
#[derive(Clone)]
pub struct MongoAccountRepository {
    users: Collection<UserRecord>,
    accounts: Collection<AccountRecord>,
}

impl MongoAccountRepository {
    /// Connect to the deployment at `url` and open `db_name`.
    pub async fn connect(url: &str, db_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(url).await?;
        Ok(Self::new(client.database(db_name)))
    }

    pub fn new(db: Database) -> Self {
        Self {
            users: db.collection("users"),
            accounts: db.collection("accounts"),
        }
    }

    /// Create the unique username index. Idempotent.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.users.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for MongoAccountRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.find_one(doc! { "username": username }).await?)
    }

    async fn create_user(&self, user: UserRecord) -> Result<UserRecord> {
        self.users.insert_one(&user).await?;
        Ok(user)
    }

    async fn create_account(&self, user_id: &str, balance: f64) -> Result<AccountRecord> {
        let account = AccountRecord::new(user_id.to_string(), balance);
        self.accounts.insert_one(&account).await?;
        Ok(account)
    }

    async fn update_user(&self, user_id: &str, patch: UserPatch) -> Result<u64> {
        if patch.is_empty() {
            // Nothing to write; still report whether the identity key exists
            // so callers can tell a no-op from a miss.
            return Ok(self.users.count_documents(doc! { "_id": user_id }).await?);
        }

        let mut set = doc! { "updated_at": Utc::now().to_rfc3339() };
        if let Some(hash) = patch.password_hash {
            set.insert("password_hash", hash);
        }
        if let Some(first) = patch.first_name {
            set.insert("first_name", first);
        }
        if let Some(last) = patch.last_name {
            set.insert("last_name", last);
        }

        let result = self
            .users
            .update_one(doc! { "_id": user_id }, doc! { "$set": set })
            .await?;
        Ok(result.matched_count)
    }

    async fn search_by_name(&self, pattern: &str) -> Result<Vec<UserSummary>> {
        let filter = doc! {
            "$or": [
                { "first_name": { "$regex": pattern } },
                { "last_name": { "$regex": pattern } }
            ]
        };
        let users: Vec<UserRecord> = self.users.find(filter).await?.try_collect().await?;
        Ok(users.iter().map(UserSummary::from).collect())
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            StoreError::DuplicateUsername
        } else {
            StoreError::Backend(err.to_string())
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}
