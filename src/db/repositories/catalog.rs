use crate::domain::{CanonicalStatus, CatalogId};
use crate::entities::{catalog_items, prelude::*};
use crate::models::anime::{CatalogItem, CatalogPatch, FieldUpdate, NewCatalogItem};
use crate::models::broadcast::BroadcastFact;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, warn};

pub struct CatalogRepository {
    conn: DatabaseConnection,
}

impl CatalogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn decode_fact(id: i32, column: &str, raw: Option<String>) -> Option<BroadcastFact> {
        let raw = raw?;
        match serde_json::from_str(&raw) {
            Ok(fact) => Some(fact),
            Err(e) => {
                warn!(id, column, error = %e, "Ignoring unreadable broadcast JSON");
                None
            }
        }
    }

    fn encode_fact(fact: &BroadcastFact) -> Option<String> {
        serde_json::to_string(fact).ok()
    }

    fn map_model(model: catalog_items::Model) -> CatalogItem {
        CatalogItem {
            id: CatalogId::new(model.id),
            title: model.title,
            status: CanonicalStatus::from_stored(&model.status).unwrap_or_default(),
            season_id: model.season_id,
            mal_id: model.mal_id,
            anilist_id: model.anilist_id,
            broadcast: Self::decode_fact(model.id, "broadcast", model.broadcast),
            broadcast_override: Self::decode_fact(
                model.id,
                "broadcast_override",
                model.broadcast_override,
            ),
            schedule_active: model.schedule_active,
            sort_order: model.sort_order,
            created_at: model.created_at,
        }
    }

    async fn next_sort_order(&self) -> Result<i32> {
        let last = CatalogItems::find()
            .order_by_desc(catalog_items::Column::SortOrder)
            .one(&self.conn)
            .await?;

        Ok(last.map_or(0, |m| m.sort_order.saturating_add(1)))
    }

    pub async fn add(&self, item: &NewCatalogItem) -> Result<CatalogItem> {
        let sort_order = match item.sort_order {
            Some(order) => order,
            None => self.next_sort_order().await?,
        };

        let active_model = catalog_items::ActiveModel {
            title: Set(item.title.clone()),
            status: Set(item.status.as_str().to_string()),
            season_id: Set(item.season_id),
            mal_id: Set(item.mal_id),
            anilist_id: Set(item.anilist_id),
            broadcast: Set(None),
            broadcast_override: Set(None),
            schedule_active: Set(true),
            sort_order: Set(sort_order),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active_model.insert(&self.conn).await?;
        info!(id = model.id, title = %model.title, "Added catalog item");

        Ok(Self::map_model(model))
    }

    pub async fn get(&self, id: CatalogId) -> Result<Option<CatalogItem>> {
        let model = CatalogItems::find_by_id(id.value()).one(&self.conn).await?;
        Ok(model.map(Self::map_model))
    }

    /// Full catalog in display order.
    pub async fn list_all(&self) -> Result<Vec<CatalogItem>> {
        let rows = CatalogItems::find()
            .order_by_asc(catalog_items::Column::SortOrder)
            .order_by_asc(catalog_items::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn list_by_season(&self, season_id: i32) -> Result<Vec<CatalogItem>> {
        let rows = CatalogItems::find()
            .filter(catalog_items::Column::SeasonId.eq(season_id))
            .order_by_asc(catalog_items::Column::SortOrder)
            .order_by_asc(catalog_items::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    /// Applies a partial update. Returns `None` when the item does not exist.
    pub async fn update(&self, id: CatalogId, patch: &CatalogPatch) -> Result<Option<CatalogItem>> {
        let Some(model) = CatalogItems::find_by_id(id.value()).one(&self.conn).await? else {
            return Ok(None);
        };

        if patch.is_empty() {
            return Ok(Some(Self::map_model(model)));
        }

        let mut active: catalog_items::ActiveModel = model.into();

        if let Some(title) = &patch.title {
            active.title = Set(title.clone());
        }
        if let Some(status) = patch.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(mal_id) = patch.mal_id {
            active.mal_id = Set(Some(mal_id));
        }
        if let Some(anilist_id) = patch.anilist_id {
            active.anilist_id = Set(Some(anilist_id));
        }
        match &patch.broadcast {
            FieldUpdate::Keep => {}
            FieldUpdate::Clear => active.broadcast = Set(None),
            FieldUpdate::Set(fact) => active.broadcast = Set(Self::encode_fact(fact)),
        }
        match &patch.broadcast_override {
            FieldUpdate::Keep => {}
            FieldUpdate::Clear => active.broadcast_override = Set(None),
            FieldUpdate::Set(fact) => active.broadcast_override = Set(Self::encode_fact(fact)),
        }
        if let Some(schedule_active) = patch.schedule_active {
            active.schedule_active = Set(schedule_active);
        }

        let model = active.update(&self.conn).await?;
        info!(id = model.id, "Updated catalog item");

        Ok(Some(Self::map_model(model)))
    }

    pub async fn remove(&self, id: CatalogId) -> Result<bool> {
        let result = CatalogItems::delete_by_id(id.value())
            .exec(&self.conn)
            .await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed catalog item with ID: {}", id);
        }
        Ok(removed)
    }
}
