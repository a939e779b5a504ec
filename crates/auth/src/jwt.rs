use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

/// Claims carried by a session token. The subject — the user's identity
/// key — is the sole claim; tokens carry no expiry.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
}

/// Issues and verifies HS256 session tokens.
///
/// The signing secret is injected at construction time and is the only
/// trust anchor: a token is valid iff its signature checks out against it.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens are deliberately unbounded in time; the default validation
        // would reject every one of them for the missing `exp` claim.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Mint a token binding `subject` as its sole claim.
    pub fn issue(&self, subject: &str) -> Result<String> {
        let claims = Claims {
            sub: subject.to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenEncoding(e.to_string()))
    }

    /// Check the signature and return the embedded subject.
    ///
    /// Malformed and tampered tokens fail identically: callers can only see
    /// "unauthenticated", never which of the two it was.
    pub fn verify(&self, token: &str) -> Result<String> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|_| AuthError::InvalidToken)
    }
}
