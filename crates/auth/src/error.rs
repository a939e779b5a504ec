use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("stored password hash is not parseable")]
    InvalidHash,

    #[error("username is already taken")]
    DuplicateUsername,

    #[error("user not found")]
    UserNotFound,

    #[error("incorrect password")]
    BadCredential,

    #[error("invalid token")]
    InvalidToken,

    #[error("token encoding failed: {0}")]
    TokenEncoding(String),

    #[error("no user matched the update")]
    NotFoundOrNoop,

    #[error(transparent)]
    Store(#[from] storage::StoreError),
}

pub type Result<T> = std::result::Result<T, AuthError>;
