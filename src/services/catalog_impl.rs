//! `SeaORM` implementation of the [`CatalogStore`] trait.

use crate::db::Store;
use crate::domain::CatalogId;
use crate::models::anime::{CatalogItem, CatalogPatch, NewCatalogItem};
use crate::services::catalog::{CatalogError, CatalogStore};

#[async_trait::async_trait]
impl CatalogStore for Store {
    async fn get_all(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        Ok(self.list_catalog().await?)
    }

    async fn get_by_id(&self, id: CatalogId) -> Result<Option<CatalogItem>, CatalogError> {
        Ok(self.get_catalog_item(id).await?)
    }

    async fn update(
        &self,
        id: CatalogId,
        patch: &CatalogPatch,
    ) -> Result<CatalogItem, CatalogError> {
        self.update_catalog_item(id, patch)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    async fn add_item(&self, item: NewCatalogItem) -> Result<CatalogItem, CatalogError> {
        if item.title.trim().is_empty() {
            return Err(CatalogError::InvalidData("title must not be empty".to_string()));
        }
        Ok(self.add_catalog_item(&item).await?)
    }

    async fn list_by_season(&self, season_id: i32) -> Result<Vec<CatalogItem>, CatalogError> {
        Ok(self.list_season(season_id).await?)
    }

    async fn remove_item(&self, id: CatalogId) -> Result<bool, CatalogError> {
        Ok(self.remove_catalog_item(id).await?)
    }
}
