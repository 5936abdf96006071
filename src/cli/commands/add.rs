use super::open_store;
use crate::clients::AnilistClient;
use crate::config::Config;
use crate::domain::CanonicalStatus;
use crate::models::anime::NewCatalogItem;
use crate::services::CatalogStore;
use tracing::warn;

pub async fn cmd_add_item(
    config: &Config,
    title: &str,
    mal_id: Option<i32>,
    anilist_id: Option<i32>,
    season_id: Option<i32>,
    status: CanonicalStatus,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;

    let anilist_id = match (anilist_id, mal_id) {
        (None, Some(mal_id)) => {
            let client = AnilistClient::with_options(&config.providers.anilist_options());
            match client.anilist_id_for_mal(mal_id).await {
                Ok(found) => found,
                Err(e) => {
                    warn!(mal_id, error = %e, "AniList id lookup failed");
                    None
                }
            }
        }
        (ids, _) => ids,
    };

    let item = store
        .add_item(NewCatalogItem {
            title: title.to_string(),
            status,
            season_id,
            mal_id,
            anilist_id,
            sort_order: None,
        })
        .await?;

    println!("✓ Added: {} (ID: {})", item.title, item.id);
    if item.mal_id.is_some() || item.anilist_id.is_some() {
        println!("  Fetch broadcast data with: animehub link {}", item.id);
    }

    Ok(())
}
