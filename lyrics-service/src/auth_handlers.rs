use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use common_auth::password::{self, PasswordError};
use common_auth::{TokenType, ROLE_USER};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::{ApiError, ApiResult};
use crate::store::UserRecord;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    let RegisterRequest {
        email,
        username,
        password,
    } = request;

    validate_registration(&email, &username, &password)?;

    let password_hash = password::hash(&password).map_err(|err| match err {
        PasswordError::EmptySecret => ApiError::bad_request("Password must not be empty"),
        other => ApiError::internal(other),
    })?;

    let record = UserRecord {
        id: Uuid::new_v4(),
        email,
        username,
        password_hash,
        role: ROLE_USER.to_string(),
        created_at: Utc::now(),
    };

    state
        .users
        .insert(record.clone())
        .map_err(|err| ApiError::conflict(err.to_string()))?;

    info!(user_id = %record.id, "registered new user");
    let tokens = issue_tokens(&state, record.id, Some(&record.role))?;
    Ok((StatusCode::CREATED, Json(tokens)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let user = state
        .users
        .find_by_email(&request.email)
        .ok_or_else(ApiError::invalid_credentials)?;

    if !password::verify(&request.password, &user.password_hash) {
        debug!(user_id = %user.id, "password mismatch");
        return Err(ApiError::invalid_credentials());
    }

    let tokens = issue_tokens(&state, user.id, Some(&user.role))?;
    Ok(Json(tokens))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let claims = state
        .codec
        .verify(&request.refresh_token)
        .map_err(|_| ApiError::invalid_token())?;

    if claims.token_type != TokenType::Refresh {
        return Err(ApiError::invalid_token());
    }

    let tokens = issue_tokens(&state, claims.subject, claims.role.as_deref())?;
    Ok(Json(tokens))
}

const MIN_USERNAME_LENGTH: usize = 3;
const MIN_PASSWORD_LENGTH: usize = 6;

fn validate_registration(email: &str, username: &str, password: &str) -> ApiResult<()> {
    if !is_valid_email(email) {
        return Err(ApiError::bad_request("Invalid email format"));
    }
    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(ApiError::bad_request(
            "Username must be at least 3 characters",
        ));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::bad_request(
            "Password must be at least 6 characters",
        ));
    }
    Ok(())
}

/// Non-empty local part, non-empty domain with a dotted suffix, no
/// whitespace and no second `@`.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
        None => false,
    }
}

fn issue_tokens(state: &AppState, subject: Uuid, role: Option<&str>) -> ApiResult<TokenResponse> {
    let access_token = state
        .codec
        .sign_access(subject, role)
        .map_err(ApiError::internal)?;
    let refresh_token = state
        .codec
        .sign_refresh(subject, role)
        .map_err(ApiError::internal)?;

    Ok(TokenResponse {
        access_token,
        refresh_token,
        token_type: "Bearer",
        expires_in: state.codec.config().access_ttl_seconds,
    })
}
