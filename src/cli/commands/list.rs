//! List catalog command handler

use super::open_store;
use crate::config::Config;
use crate::domain::CanonicalStatus;
use crate::models::anime::CatalogItem;
use crate::schedule::{fallback_label, is_override_active, resolve_effective};
use crate::services::CatalogStore;

pub(super) fn status_indicator(item: &CatalogItem) -> &'static str {
    match item.status {
        _ if !item.schedule_active => "⏸",
        CanonicalStatus::Airing => "🟢",
        CanonicalStatus::Finished => "✓",
        CanonicalStatus::Upcoming => "📅",
    }
}

pub(super) fn broadcast_summary(item: &CatalogItem) -> String {
    resolve_effective(item).map_or_else(
        || "no broadcast".to_string(),
        |fact| {
            let adjusted = if is_override_active(item) {
                " [adjusted]"
            } else {
                ""
            };
            format!(
                "{} {}{adjusted}",
                fact.day().unwrap_or("?"),
                fallback_label(&fact)
            )
        },
    )
}

pub async fn cmd_list_items(config: &Config, season: Option<i32>) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let items = match season {
        Some(season_id) => store.list_by_season(season_id).await?,
        None => store.get_all().await?,
    };

    if items.is_empty() {
        println!("Catalog is empty.");
        println!();
        println!("Add items with: animehub add \"title\" --mal-id <id>");
        return Ok(());
    }

    println!("Catalog ({} total)", items.len());
    println!("{:-<70}", "");

    for item in &items {
        println!("{} {}", status_indicator(item), item.title);
        println!(
            "  ID: {} | Status: {} | {}",
            item.id,
            item.status,
            broadcast_summary(item)
        );
    }

    println!();
    println!("Legend: 🟢 Airing | ✓ Finished | 📅 Upcoming | ⏸ Schedule disabled");

    Ok(())
}
