use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::claims::{Claims, ClaimsRepr, TokenType};
use crate::config::TokenConfig;
use crate::error::AuthResult;

/// Signs and verifies compact bearer tokens with a single process-wide
/// HS256 secret.
///
/// Verification is stateless; there is no server-side token store and no
/// revocation. Rotating the secret invalidates every outstanding token.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    config: TokenConfig,
}

impl TokenCodec {
    /// The secret is injected once at construction and never mutated.
    pub fn new(secret: &str, config: TokenConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            config,
        }
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Produce a signed token carrying subject, role and type claims,
    /// valid for `ttl` from now.
    pub fn sign(
        &self,
        subject: Uuid,
        role: Option<&str>,
        token_type: TokenType,
        ttl: Duration,
    ) -> AuthResult<String> {
        let now = Utc::now();
        let repr = ClaimsRepr {
            sub: subject.to_string(),
            role: role.map(str::to_owned),
            typ: token_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &repr, &self.encoding)?;
        Ok(token)
    }

    pub fn sign_access(&self, subject: Uuid, role: Option<&str>) -> AuthResult<String> {
        self.sign(
            subject,
            role,
            TokenType::Access,
            Duration::seconds(self.config.access_ttl_seconds),
        )
    }

    pub fn sign_refresh(&self, subject: Uuid, role: Option<&str>) -> AuthResult<String> {
        self.sign(
            subject,
            role,
            TokenType::Refresh,
            Duration::seconds(self.config.refresh_ttl_seconds),
        )
    }

    /// Verify signature and expiry, then surface the embedded claims
    /// unchanged. No claim is trusted before the signature validates.
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.config.leeway_seconds.into();

        let data = decode::<ClaimsRepr>(token, &self.decoding, &validation)?;
        Claims::try_from(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;

    fn codec() -> TokenCodec {
        TokenCodec::new("unit-test-secret", TokenConfig::new())
    }

    #[test]
    fn sign_then_verify_returns_claims_unchanged() {
        let codec = codec();
        let subject = Uuid::new_v4();
        let token = codec
            .sign(
                subject,
                Some("ADMIN"),
                TokenType::Access,
                Duration::seconds(600),
            )
            .expect("sign");

        let claims = codec.verify(&token).expect("verify");
        assert_eq!(claims.subject, subject);
        assert_eq!(claims.role.as_deref(), Some("ADMIN"));
        assert_eq!(claims.token_type, TokenType::Access);
        assert!(claims.expires_at > claims.issued_at);
    }

    #[test]
    fn roleless_token_round_trips_with_no_role() {
        let codec = codec();
        let token = codec
            .sign(Uuid::new_v4(), None, TokenType::Access, Duration::seconds(60))
            .expect("sign");
        let claims = codec.verify(&token).expect("verify");
        assert!(claims.role.is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = codec();
        let token = codec
            .sign(
                Uuid::new_v4(),
                Some("USER"),
                TokenType::Access,
                Duration::seconds(-60),
            )
            .expect("sign");

        let err = codec.verify(&token).expect_err("should reject");
        assert!(matches!(err, AuthError::Expired));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let codec = codec();
        let token = codec
            .sign(
                Uuid::new_v4(),
                Some("USER"),
                TokenType::Access,
                Duration::seconds(600),
            )
            .expect("sign");

        let mut tampered = token.clone();
        let last = tampered.pop().expect("non-empty token");
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        let err = codec.verify(&tampered).expect_err("should reject");
        assert!(matches!(err, AuthError::InvalidSignature));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let signer = TokenCodec::new("secret-one", TokenConfig::new());
        let verifier = TokenCodec::new("secret-two", TokenConfig::new());
        let token = signer
            .sign(Uuid::new_v4(), None, TokenType::Access, Duration::seconds(60))
            .expect("sign");

        let err = verifier.verify(&token).expect_err("should reject");
        assert!(matches!(err, AuthError::InvalidSignature));
    }

    #[test]
    fn garbage_token_is_malformed() {
        let err = codec().verify("not.a.jwt").expect_err("should reject");
        assert!(matches!(err, AuthError::Malformed));
    }

    #[test]
    fn leeway_tolerates_recent_expiry() {
        let codec = TokenCodec::new("unit-test-secret", TokenConfig::new().with_leeway(120));
        let token = codec
            .sign(Uuid::new_v4(), None, TokenType::Access, Duration::seconds(-30))
            .expect("sign");
        codec.verify(&token).expect("within leeway");
    }
}
