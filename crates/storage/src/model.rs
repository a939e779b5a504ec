use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored user.
///
/// `id` is the opaque identity key: generated once at creation, immutable
/// afterwards, and used to link account documents and as the token subject.
/// `username` is the normalized (trimmed, lower-cased) login identifier and
/// carries a unique constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(
        username: String,
        password_hash: String,
        first_name: String,
        last_name: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            password_hash,
            first_name,
            last_name,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The balance document created alongside a user at signup.
///
/// `user_id` is a reference to the user's identity key, not ownership; the
/// account never outlives nor manages the user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
}

impl AccountRecord {
    pub fn new(user_id: String, balance: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            balance,
            created_at: Utc::now(),
        }
    }
}

/// Sparse field update applied by [`crate::AccountRepository::update_user`].
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.password_hash.is_none() && self.first_name.is_none() && self.last_name.is_none()
    }
}

/// Public projection of a user returned by name search.
///
/// The type carries no hash field, so the stored credential cannot leak
/// through this path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub id: String,
}

impl From<&UserRecord> for UserSummary {
    fn from(user: &UserRecord) -> Self {
        Self {
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            id: user.id.clone(),
        }
    }
}
