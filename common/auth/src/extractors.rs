use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header::AUTHORIZATION, request::Parts, HeaderMap, HeaderValue};

use crate::claims::{Identity, TokenType};
use crate::codec::TokenCodec;
use crate::error::{AuthError, AuthResult};

/// Read the bearer credential from the request headers, verify it and
/// produce the request-scoped identity.
///
/// This is the single verification entry point; the access gate and the
/// `Identity` extractor both call it rather than layering their own
/// token handling on top.
pub fn authenticate(headers: &HeaderMap, codec: &TokenCodec) -> AuthResult<Identity> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthorization)?;
    let token = parse_bearer(header)?;
    let claims = codec.verify(token)?;
    Ok(Identity::from(claims))
}

/// Strict bearer parsing: exact `Bearer` scheme, case-sensitive, single
/// space separator, non-empty token.
fn parse_bearer(value: &HeaderValue) -> AuthResult<&str> {
    let raw = value.to_str().map_err(|_| AuthError::InvalidScheme)?;
    let token = raw.strip_prefix("Bearer ").ok_or(AuthError::InvalidScheme)?;

    if token.is_empty() || token.starts_with(' ') {
        return Err(AuthError::InvalidScheme);
    }

    Ok(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    Arc<TokenCodec>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // The gate normally runs first and leaves the identity in the
        // request extensions; fall back to direct verification for
        // routers that mount handlers without the gate layer.
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(identity.clone());
        }

        let codec = Arc::<TokenCodec>::from_ref(state);
        let identity = authenticate(&parts.headers, &codec)?;
        // Same restriction the gate applies: only access tokens
        // identify a caller.
        if identity.token_type != TokenType::Access {
            return Err(AuthError::InvalidClaim("typ"));
        }
        Ok(identity)
    }
}
