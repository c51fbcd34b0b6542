//! Character search endpoint.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use waifu_tracker_core::ScoredCandidate;

use crate::error::{AppError, Result};
use crate::search::search_characters;
use crate::state::AppState;

/// `GET /search/{name}` - up to ten candidates, best match first.
#[instrument(skip_all, fields(name = %name))]
pub async fn search(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<ScoredCandidate>>> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("search name cannot be empty".to_string()));
    }

    Ok(Json(search_characters(state.lookup(), &name).await))
}
