use crate::domain::{CanonicalStatus, CatalogId};
use crate::models::broadcast::BroadcastFact;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: CatalogId,
    pub title: String,
    #[serde(default)]
    pub status: CanonicalStatus,
    pub season_id: Option<i32>,
    pub mal_id: Option<i32>,
    pub anilist_id: Option<i32>,
    pub broadcast: Option<BroadcastFact>,
    pub broadcast_override: Option<BroadcastFact>,
    #[serde(default = "default_true")]
    pub schedule_active: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub created_at: String,
}

fn default_true() -> bool {
    true
}

impl CatalogItem {
    /// A minimal airing item, mostly useful for tests and fixtures.
    pub fn new(id: CatalogId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            status: CanonicalStatus::Airing,
            season_id: None,
            mal_id: None,
            anilist_id: None,
            broadcast: None,
            broadcast_override: None,
            schedule_active: true,
            sort_order: 0,
            created_at: String::new(),
        }
    }

    /// Applies a patch in memory, the same way the store applies it to a row.
    pub fn apply(&mut self, patch: &CatalogPatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(mal_id) = patch.mal_id {
            self.mal_id = Some(mal_id);
        }
        if let Some(anilist_id) = patch.anilist_id {
            self.anilist_id = Some(anilist_id);
        }
        patch.broadcast.apply_to(&mut self.broadcast);
        patch.broadcast_override.apply_to(&mut self.broadcast_override);
        if let Some(active) = patch.schedule_active {
            self.schedule_active = active;
        }
    }
}

/// Input for creating a catalog item.
#[derive(Debug, Clone, Default)]
pub struct NewCatalogItem {
    pub title: String,
    pub status: CanonicalStatus,
    pub season_id: Option<i32>,
    pub mal_id: Option<i32>,
    pub anilist_id: Option<i32>,
    pub sort_order: Option<i32>,
}

/// Tri-state update for optional document fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T: Clone> FieldUpdate<T> {
    pub fn apply_to(&self, target: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *target = None,
            Self::Set(value) => *target = Some(value.clone()),
        }
    }

    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Clear, Self::Set)
    }
}

/// Partial update of a catalog item. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogPatch {
    pub title: Option<String>,
    pub status: Option<CanonicalStatus>,
    pub mal_id: Option<i32>,
    pub anilist_id: Option<i32>,
    pub broadcast: FieldUpdate<BroadcastFact>,
    pub broadcast_override: FieldUpdate<BroadcastFact>,
    pub schedule_active: Option<bool>,
}

impl CatalogPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.status.is_none()
            && self.mal_id.is_none()
            && self.anilist_id.is_none()
            && self.broadcast.is_keep()
            && self.broadcast_override.is_keep()
            && self.schedule_active.is_none()
    }

    /// Sets the manual override. Entering an empty day and time clears it.
    #[must_use]
    pub fn with_override(mut self, fact: BroadcastFact) -> Self {
        self.broadcast_override = if fact.day().is_none() && fact.time().is_none() {
            FieldUpdate::Clear
        } else {
            FieldUpdate::Set(fact)
        };
        self
    }

    #[must_use]
    pub fn clear_override(mut self) -> Self {
        self.broadcast_override = FieldUpdate::Clear;
        self
    }

    #[must_use]
    pub const fn with_schedule_active(mut self, active: bool) -> Self {
        self.schedule_active = Some(active);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_override_clears() {
        let patch = CatalogPatch::default().with_override(BroadcastFact::weekly("", "", ""));
        assert_eq!(patch.broadcast_override, FieldUpdate::Clear);

        let patch = CatalogPatch::default()
            .with_override(BroadcastFact::weekly("Tuesdays", "20:00", "Asia/Tokyo"));
        assert!(matches!(patch.broadcast_override, FieldUpdate::Set(_)));
    }

    #[test]
    fn apply_patch_in_memory() {
        let mut item = CatalogItem::new(CatalogId::new(1), "Frieren");
        item.broadcast_override = Some(BroadcastFact::weekly("Friday", "23:00", "Asia/Tokyo"));

        let patch = CatalogPatch {
            status: Some(CanonicalStatus::Finished),
            anilist_id: Some(154_587),
            broadcast: FieldUpdate::Clear,
            schedule_active: Some(false),
            ..CatalogPatch::default()
        }
        .clear_override();

        item.apply(&patch);

        assert_eq!(item.status, CanonicalStatus::Finished);
        assert_eq!(item.anilist_id, Some(154_587));
        assert!(item.broadcast_override.is_none());
        assert!(!item.schedule_active);
        assert_eq!(item.title, "Frieren");
    }

    #[test]
    fn schedule_active_defaults_true_when_absent() {
        let json = r#"{"id":3,"title":"X","seasonId":null,"malId":null,"anilistId":null,"broadcast":null,"broadcastOverride":null}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert!(item.schedule_active);
        assert_eq!(item.status, CanonicalStatus::Airing);
    }

    #[test]
    fn default_patch_is_empty() {
        assert!(CatalogPatch::default().is_empty());
        assert!(!CatalogPatch::default().with_schedule_active(true).is_empty());
    }
}
