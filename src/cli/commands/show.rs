use super::list::status_indicator;
use super::{catalog_id, open_store};
use crate::config::Config;
use crate::models::broadcast::BroadcastFact;
use crate::schedule::{
    display_time, fallback_label, is_override_active, label_for_instant, next_occurrence_utc,
    resolve_effective,
};
use crate::services::CatalogStore;
use chrono::{Local, Utc};

fn describe(fact: &BroadcastFact) -> String {
    format!("{} {}", fact.day().unwrap_or("?"), fallback_label(fact))
}

pub async fn cmd_show_item(config: &Config, raw_id: i32) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let id = catalog_id(raw_id)?;

    let Some(item) = store.get_by_id(id).await? else {
        println!("Catalog item with ID {id} not found.");
        return Ok(());
    };

    println!("{} {}", status_indicator(&item), item.title);
    println!("{:-<60}", "");
    println!("ID:        {}", item.id);
    println!("Status:    {}", item.status);
    if let Some(season) = item.season_id {
        println!("Season:    {season}");
    }
    println!(
        "MAL:       {}",
        item.mal_id.map_or_else(|| "-".to_string(), |v| v.to_string())
    );
    println!(
        "AniList:   {}",
        item.anilist_id
            .map_or_else(|| "-".to_string(), |v| v.to_string())
    );
    println!(
        "Schedule:  {}",
        if item.schedule_active {
            "enabled"
        } else {
            "disabled"
        }
    );

    println!();
    match &item.broadcast {
        Some(fact) => println!("Provider broadcast: {}", describe(fact)),
        None => println!("Provider broadcast: none"),
    }
    if let Some(fact) = &item.broadcast_override {
        println!("Override:           {}", describe(fact));
    }

    let Some(effective) = resolve_effective(&item) else {
        println!();
        println!("No usable broadcast. Set one with: animehub override {id} --day <day> --time <HH:MM>");
        return Ok(());
    };

    let viewer_tz = config.schedule.viewer_tz()?;
    let local_time = match viewer_tz {
        Some(tz) => display_time(&effective, &Utc::now().with_timezone(&tz)),
        None => display_time(&effective, &Local::now()),
    };

    println!();
    println!(
        "Airs:      {} {}{}",
        effective.day().unwrap_or("?"),
        local_time,
        if is_override_active(&item) {
            " [adjusted]"
        } else {
            ""
        }
    );

    if let Some(next) = next_occurrence_utc(&effective, Utc::now()) {
        let label = match viewer_tz {
            Some(tz) => label_for_instant(&next, &tz),
            None => label_for_instant(&next, &Local),
        };
        println!(
            "Next:      {} {} ({})",
            label.day_name, label.time, label.tz_label
        );
    }

    Ok(())
}
