use crate::domain::CatalogId;
use crate::models::anime::{CatalogItem, CatalogPatch, NewCatalogItem};
use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

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

        if !db_url.starts_with(":memory:") && !db_url.contains("mode=memory") {
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

    fn catalog_repo(&self) -> repositories::catalog::CatalogRepository {
        repositories::catalog::CatalogRepository::new(self.conn.clone())
    }

    pub async fn add_catalog_item(&self, item: &NewCatalogItem) -> Result<CatalogItem> {
        self.catalog_repo().add(item).await
    }

    pub async fn get_catalog_item(&self, id: CatalogId) -> Result<Option<CatalogItem>> {
        self.catalog_repo().get(id).await
    }

    pub async fn list_catalog(&self) -> Result<Vec<CatalogItem>> {
        self.catalog_repo().list_all().await
    }

    pub async fn list_season(&self, season_id: i32) -> Result<Vec<CatalogItem>> {
        self.catalog_repo().list_by_season(season_id).await
    }

    pub async fn update_catalog_item(
        &self,
        id: CatalogId,
        patch: &CatalogPatch,
    ) -> Result<Option<CatalogItem>> {
        self.catalog_repo().update(id, patch).await
    }

    pub async fn remove_catalog_item(&self, id: CatalogId) -> Result<bool> {
        self.catalog_repo().remove(id).await
    }
}
