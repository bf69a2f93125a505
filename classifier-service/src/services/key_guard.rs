use secrecy::{ExposeSecret, Secret};
use service_core::utils::constant_time_eq;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid or missing API Key")]
    InvalidOrMissingKey,
}

/// Shared-secret check for protected routes.
#[derive(Clone)]
pub struct KeyGuard {
    secret: Secret<String>,
}

impl KeyGuard {
    pub fn new(secret: Secret<String>) -> Self {
        Self { secret }
    }

    /// An absent key is rejected exactly like a wrong one.
    pub fn authorize(&self, provided: Option<&str>) -> Result<(), AuthError> {
        match provided {
            Some(key) if constant_time_eq(key, self.secret.expose_secret()) => Ok(()),
            _ => Err(AuthError::InvalidOrMissingKey),
        }
    }
}

impl std::fmt::Debug for KeyGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyGuard")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
