//! Document-store persistence for users and their linked balance accounts.
//!
//! The [`AccountRepository`] trait is the contract the rest of the service
//! programs against; [`MongoAccountRepository`] is the production backend and
//! [`MemoryAccountRepository`] a lock-based stand-in with the same observable
//! behavior, used by tests. Login-identifier uniqueness lives in this layer:
//! both implementations make the check-and-insert of `create_user` atomic.

pub mod memory;
pub mod model;
pub mod mongo;
mod repository;

pub use memory::MemoryAccountRepository;
pub use model::{AccountRecord, UserPatch, UserRecord, UserSummary};
pub use mongo::MongoAccountRepository;
pub use repository::AccountRepository;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username is already taken")]
    DuplicateUsername,

    #[error("database error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
