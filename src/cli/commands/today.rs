use super::catalog_service;
use crate::config::{Config, parse_timezone};
use crate::schedule::{display_time, is_override_active, resolve_effective};
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

pub async fn cmd_today(config: &Config, timezone: Option<&str>) -> anyhow::Result<()> {
    let viewer_tz = match timezone {
        Some(name) => Some(parse_timezone(name)?),
        None => config.schedule.viewer_tz()?,
    };

    match viewer_tz {
        Some(tz) => print_today(config, &Utc::now().with_timezone(&tz)).await,
        None => print_today(config, &Local::now()).await,
    }
}

async fn print_today<Z>(config: &Config, now: &DateTime<Z>) -> anyhow::Result<()>
where
    Z: TimeZone,
    Z::Offset: Display,
{
    let (_store, service) = catalog_service(config).await?;
    let items = service.airing_today(now).await?;

    println!("Airing today ({})", now.format("%A %Y-%m-%d %Z"));
    println!("{:-<60}", "");

    if items.is_empty() {
        println!("Nothing airs today.");
        return Ok(());
    }

    for item in &items {
        let time = resolve_effective(item)
            .map(|fact| display_time(&fact, now))
            .unwrap_or_default();
        let adjusted = if is_override_active(item) {
            " [adjusted]"
        } else {
            ""
        };
        println!("• {time:<16} {}{adjusted}", item.title);
        println!("  ID: {} | Status: {}", item.id, item.status);
    }

    println!();
    println!("{} item(s) airing today", items.len());

    Ok(())
}
