use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::CallerIdentity;
use super::types::{GuestDto, GuestListResponse};
use super::{ApiError, AppState};
use crate::domain::GuestPayload;
use crate::services::GuestListParams;

#[derive(Debug, Deserialize)]
pub struct ListGuestsQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub inviter_id: Option<i32>,
    pub guest_type_id: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// GET /guests
/// Filtered, paginated listing. Any authenticated caller may filter by any
/// inviter id; reads are deliberately not ownership-restricted.
pub async fn list_guests(
    State(state): State<Arc<AppState>>,
    Extension(_caller): Extension<CallerIdentity>,
    Query(query): Query<ListGuestsQuery>,
) -> Result<Json<GuestListResponse>, ApiError> {
    let page = state
        .guests
        .list_guests(GuestListParams {
            page: query.page,
            per_page: query.per_page,
            inviter_id: query.inviter_id,
            guest_type_id: query.guest_type_id,
            start_date: query.start_date,
            end_date: query.end_date,
        })
        .await?;

    Ok(Json(GuestListResponse {
        guests: page.items.into_iter().map(GuestDto::from).collect(),
        total_guests: page.total_guests,
        prev_page: page.prev_page,
        next_page: page.next_page,
    }))
}

/// POST /guests
/// Creates a guest owned by the caller; a client-supplied inviter id is
/// ignored.
pub async fn create_guest(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<CallerIdentity>,
    Json(payload): Json<GuestPayload>,
) -> Result<(StatusCode, Json<GuestDto>), ApiError> {
    let guest = state.guests.create_guest(caller.0, payload).await?;
    Ok((StatusCode::CREATED, Json(GuestDto::from(guest))))
}

/// GET /guests/{id}
pub async fn get_guest(
    State(state): State<Arc<AppState>>,
    Extension(_caller): Extension<CallerIdentity>,
    Path(id): Path<i32>,
) -> Result<Json<GuestDto>, ApiError> {
    let guest = state.guests.get_guest(id).await?;
    Ok(Json(GuestDto::from(guest)))
}

/// PUT /guests/{id}
pub async fn update_guest(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<i32>,
    Json(payload): Json<GuestPayload>,
) -> Result<Json<GuestDto>, ApiError> {
    let guest = state.guests.update_guest(caller.0, id, payload).await?;
    Ok(Json(GuestDto::from(guest)))
}

/// DELETE /guests/{id}
pub async fn delete_guest(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.guests.delete_guest(caller.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
