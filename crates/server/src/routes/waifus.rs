//! Collection endpoints. Every handler requires `x-user-id`.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Local;
use serde::Serialize;
use tracing::instrument;
use waifu_tracker_core::{DashboardEntry, WaifuId, WaifuRecord};

use crate::error::{AppError, Result};
use crate::middleware::RequireOwner;
use crate::services::collection::{self, AddWaifu, ReminderEntry};
use crate::state::AppState;

/// `{"message": "..."}` response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// `POST /add`
#[instrument(skip_all, fields(owner = %owner))]
pub async fn add(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
    Json(request): Json<AddWaifu>,
) -> Result<Json<MessageResponse>> {
    let outcome = collection::add_waifu(state.store(), &owner, request).await?;
    Ok(MessageResponse::new(outcome.message()))
}

/// `GET /dashboard` - soonest birthday first, unknown last.
#[instrument(skip_all, fields(owner = %owner))]
pub async fn dashboard(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
) -> Result<Json<Vec<DashboardEntry>>> {
    let today = Local::now().date_naive();
    Ok(Json(collection::dashboard(state.store(), &owner, today).await?))
}

/// `GET /waifus` - stored records in insertion order.
#[instrument(skip_all, fields(owner = %owner))]
pub async fn list(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
) -> Result<Json<Vec<WaifuRecord>>> {
    Ok(Json(state.store().list_by_owner(&owner).await?))
}

/// `GET /reminders` - birthdays today or tomorrow.
#[instrument(skip_all, fields(owner = %owner))]
pub async fn reminders(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
) -> Result<Json<Vec<ReminderEntry>>> {
    let today = Local::now().date_naive();
    Ok(Json(collection::reminders(state.store(), &owner, today).await?))
}

/// `DELETE /delete/{id}`
#[instrument(skip_all, fields(owner = %owner, waifu_id = id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>> {
    if state.store().delete(&owner, WaifuId::new(id)).await? {
        tracing::info!("Waifu deleted");
        Ok(MessageResponse::new("Deleted successfully"))
    } else {
        Err(AppError::NotFound(
            "Waifu not found (or you don't own it)".to_string(),
        ))
    }
}
