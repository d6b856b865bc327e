use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::entities::{guest_types, prelude::*};

pub struct GuestTypeRepository {
    conn: DatabaseConnection,
}

impl GuestTypeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<guest_types::Model>> {
        GuestTypes::find()
            .order_by_asc(guest_types::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list guest types")
    }

    /// Known ids, used as the validation context for guest payloads.
    pub async fn ids(&self) -> Result<Vec<i32>> {
        let types = self.list_all().await?;
        Ok(types.into_iter().map(|t| t.id).collect())
    }
}
