use anyhow::anyhow;

use crate::db::{GuestListFilter, GuestRecord, Store};
use crate::domain::{
    DATE_FORMAT, TIME_FORMAT, FieldErrors, GuestPayload, ValidationContext, exit_instant,
    parse_date, parse_time, validate_guest,
};
use crate::entities::guests;

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_PER_PAGE: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum GuestError {
    #[error("Guest not found")]
    NotFound,

    #[error("Access denied")]
    AccessDenied,

    #[error("validation failed")]
    Validation(FieldErrors),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl GuestError {
    fn field(name: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(name.to_string(), message.to_string());
        Self::Validation(errors)
    }
}

/// Raw listing parameters as they arrive from the query string. Signed so
/// that non-positive page numbers surface as validation errors rather than
/// deserialization failures.
#[derive(Debug, Clone, Default)]
pub struct GuestListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub inviter_id: Option<i32>,
    pub guest_type_id: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug)]
pub struct GuestPage {
    pub items: Vec<guests::Model>,
    pub total_guests: u64,
    pub prev_page: Option<u64>,
    pub next_page: Option<u64>,
}

/// Query and command surface over the guest record store. Reads are open
/// to any authenticated caller; mutations are restricted to the owning
/// inviter.
#[derive(Clone)]
pub struct GuestService {
    store: Store,
}

impl GuestService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Lists guests matching the given filters, one page at a time.
    /// Ordering is ascending id. `total_guests` counts every matching row,
    /// not just the returned page.
    pub async fn list_guests(&self, params: GuestListParams) -> Result<GuestPage, GuestError> {
        let page = match params.page {
            None => DEFAULT_PAGE,
            Some(p) if p >= 1 => p as u64,
            Some(_) => {
                return Err(GuestError::field("page", "Must be a positive integer."));
            }
        };

        let per_page = match params.per_page {
            None => DEFAULT_PER_PAGE,
            Some(p) if p >= 1 => p as u64,
            Some(_) => {
                return Err(GuestError::field("per_page", "Must be a positive integer."));
            }
        };

        let filter = GuestListFilter {
            inviter_id: params.inviter_id,
            guest_type_id: params.guest_type_id,
            start_date: normalize_date_filter("start_date", params.start_date.as_deref())?,
            end_date: normalize_date_filter("end_date", params.end_date.as_deref())?,
        };

        let (items, total_guests, total_pages) =
            self.store.list_guests(&filter, page, per_page).await?;

        Ok(GuestPage {
            items,
            total_guests,
            prev_page: (page > 1).then(|| page - 1),
            next_page: (page < total_pages).then(|| page + 1),
        })
    }

    /// Creates a guest owned by the caller. Whatever inviter the client
    /// claims in the payload is ignored; the verified caller identity wins.
    pub async fn create_guest(
        &self,
        caller_id: i32,
        payload: GuestPayload,
    ) -> Result<guests::Model, GuestError> {
        let record = self.validate_and_build(caller_id, &payload).await?;
        Ok(self.store.insert_guest(record).await?)
    }

    pub async fn get_guest(&self, id: i32) -> Result<guests::Model, GuestError> {
        self.store
            .get_guest(id)
            .await?
            .ok_or(GuestError::NotFound)
    }

    /// Overwrites all mutable fields and re-derives the exit instant.
    /// Ownership is checked before the payload is validated: a foreign
    /// caller learns the record exists but nothing about its contents.
    pub async fn update_guest(
        &self,
        caller_id: i32,
        id: i32,
        payload: GuestPayload,
    ) -> Result<guests::Model, GuestError> {
        let guest = self.get_guest(id).await?;

        if guest.inviter_id != caller_id {
            return Err(GuestError::AccessDenied);
        }

        let record = self.validate_and_build(guest.inviter_id, &payload).await?;
        Ok(self.store.update_guest(guest, record).await?)
    }

    pub async fn delete_guest(&self, caller_id: i32, id: i32) -> Result<(), GuestError> {
        let guest = self.get_guest(id).await?;

        if guest.inviter_id != caller_id {
            return Err(GuestError::AccessDenied);
        }

        self.store.delete_guest(id).await?;
        Ok(())
    }

    pub async fn list_guest_types(
        &self,
    ) -> Result<Vec<crate::entities::guest_types::Model>, GuestError> {
        Ok(self.store.list_guest_types().await?)
    }

    /// Validates the payload against the schema and derives the exit
    /// instant. Returns the full field-error map on any failure; performs
    /// no writes.
    async fn validate_and_build(
        &self,
        inviter_id: i32,
        payload: &GuestPayload,
    ) -> Result<GuestRecord, GuestError> {
        let known_guest_type_ids = self.store.guest_type_ids().await?;
        let ctx = ValidationContext {
            known_guest_type_ids: &known_guest_type_ids,
        };

        let errors = validate_guest(payload, &ctx);
        if !errors.is_empty() {
            return Err(GuestError::Validation(errors));
        }

        // Fields are present and well-formed once validation passes.
        let guest_type_id = payload
            .guest_type_id
            .ok_or_else(|| anyhow!("validated payload lost guest_type_id"))?;
        let coming_date = payload
            .coming_date
            .as_deref()
            .and_then(parse_date)
            .ok_or_else(|| anyhow!("validated payload lost coming_date"))?;
        let coming_time = payload
            .coming_time
            .as_deref()
            .and_then(parse_time)
            .ok_or_else(|| anyhow!("validated payload lost coming_time"))?;
        let stay_time = payload
            .stay_time
            .as_deref()
            .and_then(parse_time)
            .ok_or_else(|| anyhow!("validated payload lost stay_time"))?;

        let (exit_date, exit_time) = exit_instant(coming_date, coming_time, stay_time);

        Ok(GuestRecord {
            guest_type_id,
            inviter_id,
            coming_date: coming_date.format(DATE_FORMAT).to_string(),
            coming_time: coming_time.format(TIME_FORMAT).to_string(),
            stay_time: stay_time.format(TIME_FORMAT).to_string(),
            exit_date: exit_date.format(DATE_FORMAT).to_string(),
            exit_time: exit_time.format(TIME_FORMAT).to_string(),
            comment: payload.comment.clone(),
        })
    }
}

/// Validates and normalizes an optional date filter to "YYYY-MM-DD", so
/// the stored strings compare correctly.
fn normalize_date_filter(
    field: &str,
    value: Option<&str>,
) -> Result<Option<String>, GuestError> {
    match value {
        None => Ok(None),
        Some(v) => parse_date(v)
            .map(|d| Some(d.format(DATE_FORMAT).to_string()))
            .ok_or_else(|| GuestError::field(field, "Not a valid date, expected YYYY-MM-DD.")),
    }
}
