use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ApiError, ApiResult};
use crate::store::SongRecord;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSongRequest {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub lyrics: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SongResponse {
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    pub lyrics: Option<String>,
}

impl From<SongRecord> for SongResponse {
    fn from(record: SongRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            artist: record.artist,
            lyrics: record.lyrics,
        }
    }
}

pub async fn list_songs(State(state): State<AppState>) -> Json<Vec<SongResponse>> {
    let songs = state
        .songs
        .list()
        .into_iter()
        .map(SongResponse::from)
        .collect();
    Json(songs)
}

pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SongResponse>> {
    let song = state
        .songs
        .get(id)
        .ok_or_else(|| ApiError::not_found("Song not found"))?;
    Ok(Json(song.into()))
}

pub async fn create_song(
    State(state): State<AppState>,
    Json(request): Json<CreateSongRequest>,
) -> ApiResult<(StatusCode, Json<SongResponse>)> {
    if request.title.trim().is_empty() || request.artist.trim().is_empty() {
        return Err(ApiError::bad_request("Title and artist are required"));
    }

    let record = SongRecord {
        id: Uuid::new_v4(),
        title: request.title,
        artist: request.artist,
        lyrics: request.lyrics,
        created_at: Utc::now(),
    };
    state.songs.insert(record.clone());

    Ok((StatusCode::CREATED, Json(record.into())))
}

pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .songs
        .remove(id)
        .ok_or_else(|| ApiError::not_found("Song not found"))?;
    Ok(StatusCode::NO_CONTENT)
}
