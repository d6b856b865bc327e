use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{guest_types, guests};

pub mod migrator;
pub mod repositories;

pub use repositories::guest::{GuestListFilter, GuestRecord};
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        // Every pooled connection to an in-memory sqlite URL opens its own
        // database, so migrations would only exist on one of them.
        let (max_connections, min_connections) = if db_url.contains(":memory:") {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn guest_repo(&self) -> repositories::guest::GuestRepository {
        repositories::guest::GuestRepository::new(self.conn.clone())
    }

    fn guest_type_repo(&self) -> repositories::guest_type::GuestTypeRepository {
        repositories::guest_type::GuestTypeRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    // ========== Guest Record Store ==========

    pub async fn list_guests(
        &self,
        filter: &GuestListFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<guests::Model>, u64, u64)> {
        self.guest_repo().list(filter, page, per_page).await
    }

    pub async fn get_guest(&self, id: i32) -> Result<Option<guests::Model>> {
        self.guest_repo().get(id).await
    }

    pub async fn insert_guest(&self, record: GuestRecord) -> Result<guests::Model> {
        self.guest_repo().insert(record).await
    }

    pub async fn update_guest(
        &self,
        guest: guests::Model,
        record: GuestRecord,
    ) -> Result<guests::Model> {
        self.guest_repo().update(guest, record).await
    }

    pub async fn delete_guest(&self, id: i32) -> Result<bool> {
        self.guest_repo().delete(id).await
    }

    // ========== Guest Type Registry ==========

    pub async fn list_guest_types(&self) -> Result<Vec<guest_types::Model>> {
        self.guest_type_repo().list_all().await
    }

    pub async fn guest_type_ids(&self) -> Result<Vec<i32>> {
        self.guest_type_repo().ids().await
    }

    // ========== User Repository Methods ==========

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        self.user_repo().verify_api_key(api_key).await
    }
}
