//! Linking items through stub providers and reading the daily schedule back
//! from a SQLite-backed catalog.

use animehub::db::Store;
use animehub::domain::{CanonicalStatus, ExternalIds};
use animehub::models::{BroadcastFact, NewCatalogItem, NormalizedProviderRecord, ProviderKind};
use animehub::services::{
    CatalogError, CatalogService, CatalogStore, MetadataProvider, ProviderError, Reconciler,
};
use chrono::{DateTime, TimeZone};
use chrono_tz::America::New_York;
use chrono_tz::Tz;
use std::sync::Arc;

const FRIEREN_MAL: i32 = 52_991;
const FINISHED_MAL: i32 = 5_114;

struct StubAnilist;

#[async_trait::async_trait]
impl MetadataProvider for StubAnilist {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anilist
    }

    async fn fetch(&self, ids: &ExternalIds) -> Result<NormalizedProviderRecord, ProviderError> {
        match ids.mal_id {
            Some(FRIEREN_MAL) => Ok(record(
                154_587,
                CanonicalStatus::Airing,
                Some(BroadcastFact::weekly("Mondays", "00:00", "Asia/Tokyo")),
            )),
            Some(FINISHED_MAL) => Ok(record(5_114, CanonicalStatus::Finished, None)),
            _ => Err(ProviderError::not_found(ProviderKind::Anilist, "unknown")),
        }
    }
}

struct DownJikan;

#[async_trait::async_trait]
impl MetadataProvider for DownJikan {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Jikan
    }

    async fn fetch(&self, _ids: &ExternalIds) -> Result<NormalizedProviderRecord, ProviderError> {
        Err(ProviderError::Status {
            provider: ProviderKind::Jikan,
            status: 503,
        })
    }
}

fn record(
    anilist_id: i32,
    status: CanonicalStatus,
    broadcast: Option<BroadcastFact>,
) -> NormalizedProviderRecord {
    NormalizedProviderRecord {
        source: ProviderKind::Anilist,
        external_id: anilist_id,
        mal_id: None,
        anilist_id: Some(anilist_id),
        title: "Stub".to_string(),
        status,
        episode_count: Some(28),
        genres: vec!["Adventure".to_string()],
        studios: vec!["Madhouse".to_string()],
        synopsis: None,
        score: Some(9.1),
        aired_from: None,
        aired_to: None,
        broadcast,
        next_airing: None,
        schedule_active: !status.is_finished(),
    }
}

async fn test_service() -> (Arc<Store>, CatalogService) {
    let db_path =
        std::env::temp_dir().join(format!("animehub-schedule-test-{}.db", uuid::Uuid::new_v4()));
    let store = Arc::new(
        Store::new(&format!("sqlite:{}", db_path.display()))
            .await
            .expect("failed to open store"),
    );
    let reconciler = Reconciler::new(Arc::new(StubAnilist), Arc::new(DownJikan));
    let service = CatalogService::new(store.clone(), reconciler);
    (store, service)
}

async fn add(store: &Store, title: &str, mal_id: Option<i32>) -> animehub::domain::CatalogId {
    store
        .add_item(NewCatalogItem {
            title: title.to_string(),
            mal_id,
            ..NewCatalogItem::default()
        })
        .await
        .unwrap()
        .id
}

fn new_york(y: i32, m: u32, d: u32, h: u32) -> DateTime<Tz> {
    New_York.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

async fn titles_today(service: &CatalogService, now: &DateTime<Tz>) -> Vec<String> {
    service
        .airing_today(now)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.title)
        .collect()
}

#[tokio::test]
async fn linked_items_show_up_on_their_viewer_day() {
    let (store, service) = test_service().await;
    let frieren = add(&store, "Frieren", Some(FRIEREN_MAL)).await;
    let finished = add(&store, "Finished Show", Some(FINISHED_MAL)).await;
    add(&store, "Never Linked", None).await;

    let (item, _) = service.link_item(frieren, None, None).await.unwrap();
    assert_eq!(item.anilist_id, Some(154_587));
    assert!(item.broadcast.is_some());

    let (item, record) = service.link_item(finished, None, None).await.unwrap();
    assert_eq!(record.source, ProviderKind::Anilist);
    assert_eq!(item.status, CanonicalStatus::Finished);
    assert!(!item.schedule_active);
    assert!(item.broadcast.is_none());

    // Monday 00:00 JST is Sunday morning in New York.
    assert_eq!(
        titles_today(&service, &new_york(2024, 1, 14, 20)).await,
        ["Frieren"]
    );
    assert!(titles_today(&service, &new_york(2024, 1, 16, 20)).await.is_empty());
}

#[tokio::test]
async fn override_moves_the_item_and_can_be_cleared() {
    let (store, service) = test_service().await;
    let frieren = add(&store, "Frieren", Some(FRIEREN_MAL)).await;
    service.link_item(frieren, None, None).await.unwrap();

    service
        .set_override(frieren, BroadcastFact::weekly("Tuesdays", "20:00", "Asia/Tokyo"))
        .await
        .unwrap();

    let tuesday = new_york(2024, 1, 16, 12);
    assert_eq!(titles_today(&service, &tuesday).await, ["Frieren"]);
    assert!(titles_today(&service, &new_york(2024, 1, 14, 20)).await.is_empty());

    service.clear_override(frieren).await.unwrap();
    assert!(titles_today(&service, &tuesday).await.is_empty());
    assert_eq!(
        titles_today(&service, &new_york(2024, 1, 14, 20)).await,
        ["Frieren"]
    );
}

#[tokio::test]
async fn disabled_items_are_hidden_until_enabled() {
    let (store, service) = test_service().await;
    let frieren = add(&store, "Frieren", Some(FRIEREN_MAL)).await;
    service.link_item(frieren, None, None).await.unwrap();

    let sunday = new_york(2024, 1, 14, 20);

    service.set_schedule_active(frieren, false).await.unwrap();
    assert!(titles_today(&service, &sunday).await.is_empty());

    service.set_schedule_active(frieren, true).await.unwrap();
    assert_eq!(titles_today(&service, &sunday).await, ["Frieren"]);
}

#[tokio::test]
async fn both_providers_failing_leaves_the_item_untouched() {
    let (store, service) = test_service().await;
    let unknown = add(&store, "Obscure OVA", Some(1)).await;

    let err = service.link_item(unknown, None, None).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Provider(ProviderError::Exhausted { .. })
    ));

    let item = store.get_by_id(unknown).await.unwrap().unwrap();
    assert!(item.broadcast.is_none());
    assert_eq!(item.anilist_id, None);
    assert_eq!(item.status, CanonicalStatus::Airing);
}
