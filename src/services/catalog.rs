//! Catalog persistence seam and the admin operations built on it.

use crate::domain::{CatalogId, ExternalIds};
use crate::models::anime::{CatalogItem, CatalogPatch, NewCatalogItem};
use crate::models::broadcast::BroadcastFact;
use crate::models::provider::NormalizedProviderRecord;
use crate::schedule::select_airing_today;
use crate::services::provider::ProviderError;
use crate::services::reconcile::{Reconciler, record_to_patch};
use chrono::{DateTime, TimeZone};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog item not found: {0}")]
    NotFound(CatalogId),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid catalog data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Document-style catalog storage.
///
/// `get_all` returns items in catalog order. `update` applies a partial
/// patch and fails with [`CatalogError::NotFound`] for unknown ids.
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_all(&self) -> Result<Vec<CatalogItem>, CatalogError>;

    async fn get_by_id(&self, id: CatalogId) -> Result<Option<CatalogItem>, CatalogError>;

    async fn update(&self, id: CatalogId, patch: &CatalogPatch)
    -> Result<CatalogItem, CatalogError>;

    async fn add_item(&self, item: NewCatalogItem) -> Result<CatalogItem, CatalogError>;

    async fn list_by_season(&self, season_id: i32) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Returns `false` when nothing was removed.
    async fn remove_item(&self, id: CatalogId) -> Result<bool, CatalogError>;
}

/// Admin operations over a [`CatalogStore`].
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    reconciler: Reconciler,
}

impl CatalogService {
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>, reconciler: Reconciler) -> Self {
        Self { store, reconciler }
    }

    async fn require(&self, id: CatalogId) -> Result<CatalogItem, CatalogError> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Links (or re-links) an item to provider data and stores the result.
    ///
    /// Ids passed in win over the ids already stored on the item.
    pub async fn link_item(
        &self,
        id: CatalogId,
        mal_id: Option<i32>,
        anilist_id: Option<i32>,
    ) -> Result<(CatalogItem, NormalizedProviderRecord), CatalogError> {
        let item = self.require(id).await?;
        let ids = ExternalIds::new(mal_id.or(item.mal_id), anilist_id.or(item.anilist_id));

        if ids.is_empty() {
            return Err(CatalogError::InvalidData(format!(
                "item {id} has no MAL or AniList id to link with"
            )));
        }

        let record = self.reconciler.link_and_enrich(ids.mal_id, ids.anilist_id).await?;
        let updated = self.store.update(id, &record_to_patch(&record)).await?;

        info!(%id, source = %record.source, status = %updated.status, "Linked catalog item");
        Ok((updated, record))
    }

    /// Stores an admin broadcast override. An empty day and time clears it.
    pub async fn set_override(
        &self,
        id: CatalogId,
        fact: BroadcastFact,
    ) -> Result<CatalogItem, CatalogError> {
        let cleared = fact.day().is_none() && fact.time().is_none();
        if !cleared {
            if !fact.is_complete() {
                return Err(CatalogError::InvalidData(
                    "an override needs both a day and a time".to_string(),
                ));
            }
            if fact.slot().is_none() {
                return Err(CatalogError::InvalidData(format!(
                    "unrecognized override {} {} {}",
                    fact.day().unwrap_or_default(),
                    fact.time().unwrap_or_default(),
                    fact.timezone_name()
                )));
            }
        }

        let item = self
            .store
            .update(id, &CatalogPatch::default().with_override(fact))
            .await?;

        info!(%id, cleared, "Updated broadcast override");
        Ok(item)
    }

    pub async fn clear_override(&self, id: CatalogId) -> Result<CatalogItem, CatalogError> {
        let item = self
            .store
            .update(id, &CatalogPatch::default().clear_override())
            .await?;

        info!(%id, "Cleared broadcast override");
        Ok(item)
    }

    pub async fn set_schedule_active(
        &self,
        id: CatalogId,
        active: bool,
    ) -> Result<CatalogItem, CatalogError> {
        let item = self
            .store
            .update(id, &CatalogPatch::default().with_schedule_active(active))
            .await?;

        info!(%id, active, "Updated schedule flag");
        Ok(item)
    }

    /// Items airing on the viewer's current day, in catalog order.
    pub async fn airing_today<Z: TimeZone>(
        &self,
        now: &DateTime<Z>,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let items = self.store.get_all().await?;
        Ok(select_airing_today(&items, now)
            .into_iter()
            .cloned()
            .collect())
    }
}
