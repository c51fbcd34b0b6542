//! Owner identification.
//!
//! There is no account system: the client names itself in the `x-user-id`
//! header and every store operation is scoped to that value.

use axum::{extract::FromRequestParts, http::request::Parts};
use waifu_tracker_core::OwnerId;

use crate::error::{AppError, set_sentry_user};

/// Header carrying the caller's owner id.
pub const OWNER_HEADER: &str = "x-user-id";

/// Extractor that requires an owner id.
///
/// Rejects with 401 when the header is missing, blank or not valid UTF-8,
/// before the handler touches the store.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(RequireOwner(owner): RequireOwner) -> impl IntoResponse {
///     format!("Hello, {owner}!")
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireOwner(pub OwnerId);

impl<S> FromRequestParts<S> for RequireOwner
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing x-user-id header".to_string()))?;

        let owner = OwnerId::parse(raw)
            .map_err(|e| AppError::Unauthorized(format!("Invalid x-user-id header: {e}")))?;

        set_sentry_user(&owner);
        tracing::Span::current().record("owner_id", owner.as_str());

        Ok(Self(owner))
    }
}
