use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

/// Discriminates access tokens (accepted by the gate) from refresh
/// tokens (accepted only by the refresh endpoint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Application-focused representation of verified token claims.
#[derive(Debug, Clone, Serialize)]
pub struct Claims {
    pub subject: Uuid,
    pub role: Option<String>,
    pub token_type: TokenType,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Claims {
    /// Convenience helper for role checks. An absent or empty role claim
    /// never matches.
    pub fn has_role(&self, role: &str) -> bool {
        !role.is_empty() && self.role.as_deref() == Some(role)
    }
}

/// Request-scoped principal derived from verified claims. Attached to
/// the request extensions by the access gate and discarded with the
/// request; never persisted.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: Uuid,
    pub role: Option<String>,
    pub token_type: TokenType,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.subject,
            role: claims.role,
            token_type: claims.token_type,
        }
    }
}

/// Wire representation of the JWT payload.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ClaimsRepr {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub typ: TokenType,
    pub iat: i64,
    pub exp: i64,
}

impl TryFrom<ClaimsRepr> for Claims {
    type Error = AuthError;

    fn try_from(value: ClaimsRepr) -> AuthResult<Self> {
        let subject = Uuid::parse_str(&value.sub).map_err(|_| AuthError::InvalidClaim("sub"))?;

        let issued_at = Utc
            .timestamp_opt(value.iat, 0)
            .single()
            .ok_or(AuthError::InvalidClaim("iat"))?;
        let expires_at = Utc
            .timestamp_opt(value.exp, 0)
            .single()
            .ok_or(AuthError::InvalidClaim("exp"))?;

        Ok(Self {
            subject,
            role: value.role,
            token_type: value.typ,
            issued_at,
            expires_at,
        })
    }
}
