use axum::extract::State;
use axum::Json;
use common_auth::Identity;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::{ApiError, ApiResult};
use crate::store::UserRecord;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: String,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            username: record.username,
            role: record.role,
        }
    }
}

/// The authenticated caller's own profile.
pub async fn me(
    State(state): State<AppState>,
    identity: Identity,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .users
        .find_by_id(identity.id)
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(user.into()))
}

/// Full account listing; the access gate restricts this to ADMIN.
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<UserResponse>> {
    let users = state
        .users
        .list()
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Json(users)
}
