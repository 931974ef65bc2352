//! Secret key management for session token signing.

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::service::{Result, ServiceError};

/// Secret keys used for session token authentication.
///
/// Both keys are derived from one shared HMAC secret. The struct is
/// cheaply cloneable and safe to hand to every request handler.
#[derive(Clone)]
pub struct AuthKeys {
    inner: Arc<AuthKeysInner>,
}

/// Internal container for the actual key data.
struct AuthKeysInner {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
}

impl AuthKeys {
    /// Creates a new `AuthKeys` instance from a shared secret.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the secret is empty.
    pub fn from_secret(secret: &str) -> Result<Self> {
        if secret.is_empty() {
            return Err(ServiceError::auth("auth secret must not be empty"));
        }

        let inner = Arc::new(AuthKeysInner {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
        });

        Ok(Self { inner })
    }

    /// Returns a reference to the decoding key.
    ///
    /// This key is used to verify session tokens.
    #[inline]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding_key
    }

    /// Returns a reference to the encoding key.
    ///
    /// This key is used to sign session tokens.
    #[inline]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding_key
    }

    /// Validates that the loaded keys are functional for JWT operations.
    ///
    /// Performs a round-trip test by signing and verifying a short-lived
    /// throwaway token.
    ///
    /// # Errors
    ///
    /// Returns an error if either direction of the round trip fails.
    pub fn validate_keys(&self) -> Result<()> {
        use jsonwebtoken::{Algorithm, Header, Validation, decode, encode};
        use serde::{Deserialize, Serialize};

        #[derive(Debug, Clone, Serialize, Deserialize)]
        struct TestClaims {
            sub: String,
            exp: usize,
        }

        let claims = TestClaims {
            sub: "key-validation".to_string(),
            exp: (jiff::Timestamp::now().as_second() + 300) as usize,
        };

        let header = Header::new(Algorithm::HS256);
        let token = encode(&header, &claims, self.encoding_key())
            .map_err(|_| ServiceError::auth("key validation encoding failed"))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        decode::<TestClaims>(&token, self.decoding_key(), &validation)
            .map_err(|_| ServiceError::auth("key validation decoding failed"))?;

        Ok(())
    }
}

impl fmt::Debug for AuthKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Key material stays out of logs.
        f.debug_struct("AuthKeys").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_from_secret_round_trip() {
        let keys = AuthKeys::from_secret("a-long-enough-test-secret").unwrap();
        let result = keys.validate_keys();
        assert!(result.is_ok(), "validate_keys failed: {:?}", result.err());
    }

    #[test]
    fn reject_empty_secret() {
        let error = AuthKeys::from_secret("").unwrap_err();
        assert_eq!(error.category(), "authentication");
    }

    #[test]
    fn debug_does_not_leak_key_material() {
        let keys = AuthKeys::from_secret("super-secret-value").unwrap();
        let debugged = format!("{keys:?}");
        assert!(!debugged.contains("super-secret-value"));
    }
}
