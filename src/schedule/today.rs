use crate::models::anime::CatalogItem;
use crate::models::broadcast::BroadcastFact;
use crate::schedule::resolver::resolve_effective;
use crate::schedule::timezone::to_most_recent_utc;
use chrono::{DateTime, Datelike, TimeZone, Utc};
use tracing::debug;

/// Whether the fact's most recent occurrence falls on the viewer's current
/// weekday. The viewer zone is the zone of `now`.
pub fn broadcast_is_today<Z: TimeZone>(fact: &BroadcastFact, now: &DateTime<Z>) -> bool {
    let Some(instant) = to_most_recent_utc(fact, now.with_timezone(&Utc)) else {
        return false;
    };

    let broadcast_day = instant.with_timezone(&now.timezone()).weekday();
    broadcast_day == now.weekday()
}

/// Selects the items airing on the viewer's current local calendar day.
///
/// Gates, in order: finished status, disabled schedule, no effective
/// broadcast, failed conversion, weekday mismatch. Input order is preserved.
/// The catalog must be fully loaded by the caller.
pub fn select_airing_today<'a, Z: TimeZone>(
    items: &'a [CatalogItem],
    now: &DateTime<Z>,
) -> Vec<&'a CatalogItem> {
    items
        .iter()
        .filter(|item| {
            if item.status.is_finished() {
                debug!(id = %item.id, "Skipping finished item");
                return false;
            }

            if !item.schedule_active {
                debug!(id = %item.id, "Skipping item with schedule disabled");
                return false;
            }

            let Some(effective) = resolve_effective(item) else {
                debug!(id = %item.id, "Skipping item without broadcast data");
                return false;
            };

            let today = broadcast_is_today(&effective, now);
            debug!(
                id = %item.id,
                day = effective.day().unwrap_or_default(),
                time = effective.time().unwrap_or_default(),
                today,
                "Evaluated broadcast"
            );
            today
        })
        .collect()
}
