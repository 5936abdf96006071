mod add;
mod link;
mod list;
mod remove;
mod schedule;
mod search;
mod show;
mod today;

pub use add::cmd_add_item;
pub use link::cmd_link_item;
pub use list::cmd_list_items;
pub use remove::cmd_remove_item;
pub use schedule::{cmd_clear_override, cmd_set_override, cmd_set_schedule_active};
pub use search::cmd_search;
pub use show::cmd_show_item;
pub use today::cmd_today;

use crate::clients::{AnilistClient, JikanClient};
use crate::config::Config;
use crate::db::Store;
use crate::domain::CatalogId;
use crate::services::{CatalogService, Reconciler};
use std::sync::Arc;

async fn open_store(config: &Config) -> anyhow::Result<Arc<Store>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    Ok(Arc::new(store))
}

fn reconciler(config: &Config) -> Reconciler {
    let anilist = AnilistClient::with_options(&config.providers.anilist_options());
    let jikan = JikanClient::with_options(&config.providers.jikan_options());
    Reconciler::new(Arc::new(anilist), Arc::new(jikan)).parallel(config.providers.parallel_lookup)
}

async fn catalog_service(config: &Config) -> anyhow::Result<(Arc<Store>, CatalogService)> {
    let store = open_store(config).await?;
    let service = CatalogService::new(store.clone(), reconciler(config));
    Ok((store, service))
}

fn catalog_id(raw: i32) -> anyhow::Result<CatalogId> {
    if raw < 0 {
        anyhow::bail!("Invalid catalog ID: {raw}");
    }
    Ok(CatalogId::new(raw))
}
