use super::{catalog_id, catalog_service};
use crate::config::Config;
use crate::constants::schedule::DEFAULT_SOURCE_TIMEZONE;
use crate::models::broadcast::BroadcastFact;
use crate::schedule::fallback_label;

pub async fn cmd_set_override(
    config: &Config,
    raw_id: i32,
    day: &str,
    time: &str,
    timezone: Option<&str>,
) -> anyhow::Result<()> {
    let (_store, service) = catalog_service(config).await?;
    let id = catalog_id(raw_id)?;

    let fact = BroadcastFact::weekly(day, time, timezone.unwrap_or(DEFAULT_SOURCE_TIMEZONE));
    let item = service.set_override(id, fact).await?;

    match &item.broadcast_override {
        Some(fact) => println!(
            "✓ {} now airs {} {} [adjusted]",
            item.title,
            fact.day().unwrap_or("?"),
            fallback_label(fact)
        ),
        None => println!("✓ Override cleared for {}", item.title),
    }

    Ok(())
}

pub async fn cmd_clear_override(config: &Config, raw_id: i32) -> anyhow::Result<()> {
    let (_store, service) = catalog_service(config).await?;
    let item = service.clear_override(catalog_id(raw_id)?).await?;

    println!("✓ Override cleared for {}", item.title);
    Ok(())
}

pub async fn cmd_set_schedule_active(
    config: &Config,
    raw_id: i32,
    active: bool,
) -> anyhow::Result<()> {
    let (_store, service) = catalog_service(config).await?;
    let item = service
        .set_schedule_active(catalog_id(raw_id)?, active)
        .await?;

    if active {
        println!("✓ {} is back in the daily schedule", item.title);
    } else {
        println!("✓ {} is hidden from the daily schedule", item.title);
    }
    Ok(())
}
