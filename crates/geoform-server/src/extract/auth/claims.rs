use std::borrow::Cow;

use jiff::{Span, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};

/// JWT claims for authentication tokens.
///
/// Only RFC 7519 registered claims are used. Signature validation reads
/// `iat` and `exp` as numeric values, so both are stored as UTC seconds
/// rather than formatted timestamps.
#[derive(Debug, Clone, Deserialize, Serialize, Hash, PartialEq, Eq)]
pub struct AuthClaims {
    /// Issuer (who created the token).
    #[serde(rename = "iss")]
    issued_by: Cow<'static, str>,
    /// Audience (who the token is intended for).
    #[serde(rename = "aud")]
    audience: Cow<'static, str>,
    /// Subject (the authenticated client identifier).
    #[serde(rename = "sub")]
    pub subject: String,
    /// Issued at (seconds since the Unix epoch).
    #[serde(rename = "iat")]
    issued_at: i64,
    /// Expiration time (seconds since the Unix epoch).
    #[serde(rename = "exp")]
    expires_at: i64,
}

impl AuthClaims {
    /// Default JWT audience identifier for authentication tokens.
    const JWT_AUDIENCE: &str = "geoform:api";
    /// Default JWT issuer identifier for authentication tokens.
    const JWT_ISSUER: &str = "geoform";
    /// Default lifetime of newly minted tokens (24 hours).
    const DEFAULT_TTL_HOURS: i64 = 24;

    /// Creates claims for the given subject with the default lifetime.
    pub fn new(subject: impl Into<String>) -> Self {
        Self::with_lifetime(subject, Span::new().hours(Self::DEFAULT_TTL_HOURS))
    }

    /// Creates claims for the given subject with an explicit lifetime.
    pub fn with_lifetime(subject: impl Into<String>, lifetime: Span) -> Self {
        let issued_at = Timestamp::now();
        let expires_at = issued_at
            .saturating_add(lifetime)
            .expect("token lifetime must not contain units greater than hours");

        Self {
            issued_by: Cow::Borrowed(Self::JWT_ISSUER),
            audience: Cow::Borrowed(Self::JWT_AUDIENCE),
            subject: subject.into(),
            issued_at: issued_at.as_second(),
            expires_at: expires_at.as_second(),
        }
    }

    /// Returns the instant the token was issued.
    #[inline]
    #[must_use]
    pub fn issued_at(&self) -> Timestamp {
        Timestamp::from_second(self.issued_at).unwrap_or(Timestamp::UNIX_EPOCH)
    }

    /// Returns the instant the token expires.
    #[inline]
    #[must_use]
    pub fn expires_at(&self) -> Timestamp {
        Timestamp::from_second(self.expires_at).unwrap_or(Timestamp::MAX)
    }

    /// Checks if the token has expired based on current UTC time.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Timestamp::now().as_second()
    }

    /// Encodes the claims into a signed JWT token.
    ///
    /// # Errors
    ///
    /// Returns an internal server error when signing fails.
    pub fn encode(&self, encoding_key: &EncodingKey) -> Result<String> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, self, encoding_key).map_err(|error| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %error,
                subject = %self.subject,
                "failed to encode auth token"
            );

            ErrorKind::InternalServerError
                .with_message("Authentication token generation failed")
                .with_context(error.to_string())
        })
    }

    /// Parses and validates a signed JWT token.
    ///
    /// Verifies the HMAC signature and the registered claims (issuer,
    /// audience, expiration) before returning the decoded claims.
    ///
    /// # Errors
    ///
    /// Returns an invalid-token error for any verification failure.
    pub fn decode(token: &str, decoding_key: &DecodingKey) -> Result<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.validate_aud = true;
        validation.set_audience(&[Self::JWT_AUDIENCE]);
        validation.set_issuer(&[Self::JWT_ISSUER]);
        validation.set_required_spec_claims(&["iss", "aud", "sub", "iat", "exp"]);

        let token_data = decode::<Self>(token, decoding_key, &validation)?;
        let claims = token_data.claims;

        // Expiration is checked again after signature validation.
        if claims.is_expired() {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                subject = %claims.subject,
                expired_at = %claims.expires_at(),
                "auth token rejected: expired"
            );

            return Err(ErrorKind::InvalidAuthToken.into_error());
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            subject = %claims.subject,
            expires_at = %claims.expires_at(),
            "auth token validated"
        );

        Ok(claims)
    }
}

impl From<jsonwebtoken::errors::Error> for Error<'static> {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            error = %error,
            "auth token rejected"
        );

        ErrorKind::InvalidAuthToken.with_context(error.to_string())
    }
}
