use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization header missing")]
    MissingAuthorization,
    #[error("authorization header does not use the Bearer scheme")]
    InvalidScheme,
    #[error("token cannot be parsed")]
    Malformed,
    #[error("token signature mismatch")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("token verification failed")]
    Verification,
    #[error("invalid claim '{0}'")]
    InvalidClaim(&'static str),
    #[error("insufficient role")]
    Forbidden,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// Fixed, non-leaking message surfaced to clients. Internal detail
    /// stays in the `Display` impl for logs only.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::MissingAuthorization => "No token provided",
            AuthError::InvalidScheme => "Invalid token type",
            AuthError::Forbidden => "Insufficient role",
            _ => "Invalid token",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match value.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => Self::Malformed,
            // Fail closed: anything else from the verification layer is
            // reported as a generic verification failure.
            _ => Self::Verification,
        }
    }
}

/// Uniform wire shape for authentication and authorization failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
    pub error: String,
}

impl ErrorBody {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.into(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        let body = ErrorBody::new(status, self.public_message());
        (status, Json(body)).into_response()
    }
}
