use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::extract::CookieJar;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use derive_more::{Deref, DerefMut, From};

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::extract::auth::AuthClaims;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::AuthKeys;

/// Name of the session cookie checked when no `Authorization` header is
/// present. Browser clients carry the token here after signing in.
pub const SESSION_COOKIE: &str = "geoform.session_token";

/// Authenticated request state backed by a validated session token.
///
/// Tokens are accepted from the `Authorization: Bearer` header or, as a
/// fallback, from the [`SESSION_COOKIE`] cookie. The decoded claims are
/// cached in the request extensions so repeated extraction within one
/// request validates the token only once.
#[must_use]
#[derive(Debug, Clone, Deref, DerefMut, From)]
pub struct AuthState(pub AuthClaims);

impl AuthState {
    /// Returns a reference to the validated claims.
    #[inline]
    pub fn claims(&self) -> &AuthClaims {
        &self.0
    }

    /// Consumes this state and returns the validated claims.
    #[inline]
    pub fn into_claims(self) -> AuthClaims {
        self.0
    }

    /// Pulls the raw token from the request, header first, cookie second.
    async fn extract_token<S>(parts: &mut Parts, state: &S) -> Result<String>
    where
        S: Send + Sync,
    {
        type AuthBearerHeader = TypedHeader<Authorization<Bearer>>;

        if let Ok(bearer_header) =
            <AuthBearerHeader as FromRequestParts<S>>::from_request_parts(parts, state).await
        {
            return Ok(bearer_header.token().to_owned());
        }

        // Cookie extraction is infallible, an absent header falls through here.
        let cookie_jar = CookieJar::from_request_parts(parts, state)
            .await
            .unwrap_or_default();

        match cookie_jar.get(SESSION_COOKIE) {
            Some(cookie) => Ok(cookie.value().to_owned()),
            None => {
                tracing::debug!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    "no bearer header or session cookie on request"
                );

                Err(ErrorKind::MissingAuthToken.into_error())
            }
        }
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send + 'static,
    AuthKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Cached state from an earlier extractor in the same request.
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(auth_state.clone());
        }

        let token = Self::extract_token(parts, state).await?;
        let auth_keys = AuthKeys::from_ref(state);
        let auth_claims = AuthClaims::decode(&token, auth_keys.decoding_key())?;

        let auth_state = Self(auth_claims);
        parts.extensions.insert(auth_state.clone());
        Ok(auth_state)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthState
where
    S: Sync + Send + 'static,
    AuthKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <Self as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(auth_state) => Ok(Some(auth_state)),
            Err(_) => Ok(None),
        }
    }
}

impl aide::OperationInput for AuthState {}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;
    use crate::service::AuthKeys;

    fn request_parts(builder: axum::http::request::Builder) -> Parts {
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn missing_token_is_rejected() {
        let keys = AuthKeys::from_secret("test-secret").unwrap();
        let mut parts = request_parts(Request::builder().uri("/api/template/list"));

        let error = <AuthState as FromRequestParts<_>>::from_request_parts(&mut parts, &keys)
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingAuthToken);
    }

    #[tokio::test]
    async fn bearer_header_is_accepted() {
        let keys = AuthKeys::from_secret("test-secret").unwrap();
        let token = AuthClaims::new("field-agent")
            .encode(keys.encoding_key())
            .unwrap();

        let mut parts = request_parts(
            Request::builder()
                .uri("/api/template/list")
                .header("authorization", format!("Bearer {token}")),
        );

        let auth_state = <AuthState as FromRequestParts<_>>::from_request_parts(&mut parts, &keys)
            .await
            .unwrap();
        assert_eq!(auth_state.claims().subject, "field-agent");

        // The second extraction is served from the request extensions.
        let cached = <AuthState as FromRequestParts<_>>::from_request_parts(&mut parts, &keys)
            .await
            .unwrap();
        assert_eq!(cached.claims().subject, "field-agent");
    }

    #[tokio::test]
    async fn session_cookie_is_accepted() {
        let keys = AuthKeys::from_secret("test-secret").unwrap();
        let token = AuthClaims::new("field-agent")
            .encode(keys.encoding_key())
            .unwrap();

        let mut parts = request_parts(
            Request::builder()
                .uri("/api/form/list")
                .header("cookie", format!("{SESSION_COOKIE}={token}")),
        );

        let auth_state = <AuthState as FromRequestParts<_>>::from_request_parts(&mut parts, &keys)
            .await
            .unwrap();
        assert_eq!(auth_state.claims().subject, "field-agent");
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() {
        let keys = AuthKeys::from_secret("test-secret").unwrap();
        let other_keys = AuthKeys::from_secret("other-secret").unwrap();
        let token = AuthClaims::new("field-agent")
            .encode(other_keys.encoding_key())
            .unwrap();

        let mut parts = request_parts(
            Request::builder()
                .uri("/api/template/list")
                .header("authorization", format!("Bearer {token}")),
        );

        let error = <AuthState as FromRequestParts<_>>::from_request_parts(&mut parts, &keys)
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidAuthToken);
    }

    #[tokio::test]
    async fn optional_extraction_swallows_auth_errors() {
        let keys = AuthKeys::from_secret("test-secret").unwrap();
        let mut parts = request_parts(Request::builder().uri("/api/health"));

        let maybe_state =
            <AuthState as OptionalFromRequestParts<_>>::from_request_parts(&mut parts, &keys)
                .await
                .unwrap();
        assert!(maybe_state.is_none());
    }
}
