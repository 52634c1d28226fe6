//! Security configuration: application secret and error exposure.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Security configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Application secret key (usually supplied via `SECRET_KEY`)
    #[serde(default, skip_serializing)]
    pub secret_key: Option<SecretString>,

    /// Include internal error details in HTTP error responses
    #[serde(default)]
    pub expose_internal_errors: bool,
}

impl SecurityConfig {
    /// Length of the configured secret key in characters, if any
    #[must_use]
    pub fn secret_key_len(&self) -> Option<usize> {
        self.secret_key
            .as_ref()
            .map(|key| key.expose_secret().chars().count())
            .filter(|len| *len > 0)
    }
}
