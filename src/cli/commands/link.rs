use super::{catalog_id, catalog_service};
use crate::config::Config;
use crate::schedule::fallback_label;

pub async fn cmd_link_item(
    config: &Config,
    raw_id: i32,
    mal_id: Option<i32>,
    anilist_id: Option<i32>,
) -> anyhow::Result<()> {
    let (_store, service) = catalog_service(config).await?;
    let id = catalog_id(raw_id)?;

    println!("Fetching provider data for item {id}...");
    let (item, record) = service.link_item(id, mal_id, anilist_id).await?;

    println!("✓ Linked: {}", item.title);
    println!("{:-<60}", "");
    println!("Source:    {} (ID: {})", record.source, record.external_id);
    println!("Title:     {}", record.title);
    println!("Status:    {}", item.status);
    if let Some(episodes) = record.episode_count {
        println!("Episodes:  {episodes}");
    }
    if let Some(score) = record.score {
        println!("Score:     {score:.1}");
    }
    if !record.genres.is_empty() {
        println!("Genres:    {}", record.genres.join(", "));
    }
    if !record.studios.is_empty() {
        println!("Studios:   {}", record.studios.join(", "));
    }
    match &item.broadcast {
        Some(fact) => println!(
            "Broadcast: {} {}",
            fact.day().unwrap_or("?"),
            fallback_label(fact)
        ),
        None => println!("Broadcast: none"),
    }
    if !item.schedule_active {
        println!();
        println!("Item is finished and was removed from the daily schedule.");
    }

    Ok(())
}
