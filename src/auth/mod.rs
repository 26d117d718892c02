pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ServiceError;

pub use client::{HttpAuthClient, TOKEN_HEADER};

/// Resolved caller identity; the only scoping key handed to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserCredentials {
    login_id: i64,
}

impl UserCredentials {
    pub fn new(login_id: i64) -> Self {
        Self { login_id }
    }

    pub fn login_id(&self) -> i64 {
        self.login_id
    }
}

/// Verifies a caller token against the authority.
///
/// Implementations must fail with `ServiceError::Auth` when the authority
/// rejects the token and `ServiceError::Transport` when it cannot be asked.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<UserCredentials, ServiceError>;
}

/// Short stable digest of a token, safe to put in logs
pub fn token_fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    hash[..12].to_string()
}
