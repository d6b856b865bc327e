use axum::{Extension, Json, extract::State};
use std::sync::Arc;

use super::auth::CallerIdentity;
use super::types::GuestTypeDto;
use super::{ApiError, AppState};

/// GET /guest-types
/// Read-only reference data; seeded out-of-band, never mutated here.
pub async fn list_guest_types(
    State(state): State<Arc<AppState>>,
    Extension(_caller): Extension<CallerIdentity>,
) -> Result<Json<Vec<GuestTypeDto>>, ApiError> {
    let types = state.guests.list_guest_types().await?;
    Ok(Json(types.into_iter().map(GuestTypeDto::from).collect()))
}
