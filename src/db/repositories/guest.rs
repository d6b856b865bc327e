use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{guests, prelude::*};

/// Optional predicates for the guest listing query. Absent fields add no
/// predicate; present fields are AND-combined. Date bounds are inclusive
/// and already validated as "YYYY-MM-DD" strings, which compare correctly
/// as text.
#[derive(Debug, Clone, Default)]
pub struct GuestListFilter {
    pub inviter_id: Option<i32>,
    pub guest_type_id: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// A fully validated guest row ready to be written: derived exit fields
/// included, inviter already resolved to the caller.
#[derive(Debug, Clone)]
pub struct GuestRecord {
    pub guest_type_id: i32,
    pub inviter_id: i32,
    pub coming_date: String,
    pub coming_time: String,
    pub stay_time: String,
    pub exit_date: String,
    pub exit_time: String,
    pub comment: Option<String>,
}

pub struct GuestRepository {
    conn: DatabaseConnection,
}

impl GuestRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Returns one page of matching guests plus the total number of
    /// matching rows and the total page count. Rows are ordered by
    /// ascending id so pagination is deterministic.
    pub async fn list(
        &self,
        filter: &GuestListFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<guests::Model>, u64, u64)> {
        let mut query = Guests::find().order_by_asc(guests::Column::Id);

        if let Some(inviter_id) = filter.inviter_id {
            query = query.filter(guests::Column::InviterId.eq(inviter_id));
        }

        if let Some(guest_type_id) = filter.guest_type_id {
            query = query.filter(guests::Column::GuestTypeId.eq(guest_type_id));
        }

        if let Some(start) = &filter.start_date {
            query = query.filter(guests::Column::ComingDate.gte(start.clone()));
        }

        if let Some(end) = &filter.end_date {
            query = query.filter(guests::Column::ComingDate.lte(end.clone()));
        }

        let paginator = query.paginate(&self.conn, per_page);
        let totals = paginator
            .num_items_and_pages()
            .await
            .context("Failed to count guests")?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .context("Failed to fetch guest page")?;

        Ok((items, totals.number_of_items, totals.number_of_pages))
    }

    pub async fn get(&self, id: i32) -> Result<Option<guests::Model>> {
        Guests::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query guest by id")
    }

    pub async fn insert(&self, record: GuestRecord) -> Result<guests::Model> {
        let active = guests::ActiveModel {
            guest_type_id: Set(record.guest_type_id),
            inviter_id: Set(record.inviter_id),
            coming_date: Set(record.coming_date),
            coming_time: Set(record.coming_time),
            stay_time: Set(record.stay_time),
            exit_date: Set(record.exit_date),
            exit_time: Set(record.exit_time),
            comment: Set(record.comment),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert guest")
    }

    /// Overwrites all mutable fields of an existing guest. `inviter_id`
    /// stays untouched; ownership never transfers.
    pub async fn update(&self, guest: guests::Model, record: GuestRecord) -> Result<guests::Model> {
        let mut active: guests::ActiveModel = guest.into();
        active.guest_type_id = Set(record.guest_type_id);
        active.coming_date = Set(record.coming_date);
        active.coming_time = Set(record.coming_time);
        active.stay_time = Set(record.stay_time);
        active.exit_date = Set(record.exit_date);
        active.exit_time = Set(record.exit_time);
        active.comment = Set(record.comment);

        active
            .update(&self.conn)
            .await
            .context("Failed to update guest")
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Guests::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete guest")?;

        Ok(result.rows_affected > 0)
    }
}
