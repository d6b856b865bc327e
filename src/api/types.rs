use serde::Serialize;

use crate::entities::{guest_types, guests};

/// Wire shape of a guest record. `stay_time` is the original duration the
/// client supplied; the derived exit instant stays internal.
#[derive(Debug, Serialize)]
pub struct GuestDto {
    pub id: i32,
    pub guest_type_id: i32,
    pub inviter_id: i32,
    pub coming_date: String,
    pub coming_time: String,
    pub stay_time: String,
    pub comment: Option<String>,
}

impl From<guests::Model> for GuestDto {
    fn from(model: guests::Model) -> Self {
        Self {
            id: model.id,
            guest_type_id: model.guest_type_id,
            inviter_id: model.inviter_id,
            coming_date: model.coming_date,
            coming_time: model.coming_time,
            stay_time: model.stay_time,
            comment: model.comment,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GuestListResponse {
    pub guests: Vec<GuestDto>,
    pub total_guests: u64,
    pub prev_page: Option<u64>,
    pub next_page: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct GuestTypeDto {
    pub id: i32,
    pub name: String,
}

impl From<guest_types::Model> for GuestTypeDto {
    fn from(model: guest_types::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}
