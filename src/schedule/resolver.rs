use crate::constants::schedule::DEFAULT_SOURCE_TIMEZONE;
use crate::models::anime::CatalogItem;
use crate::models::broadcast::BroadcastFact;

/// Picks the single broadcast fact that drives scheduling for an item.
///
/// Precedence:
/// 1. `broadcast_override` when both its day and time are non-empty, with the
///    timezone defaulted to Asia/Tokyo
/// 2. `broadcast` when its day is present, returned as stored
/// 3. `None`
///
/// An admin override is never superseded by fresher provider data until it is
/// cleared.
#[must_use]
pub fn resolve_effective(item: &CatalogItem) -> Option<BroadcastFact> {
    if let Some(manual) = item.broadcast_override.as_ref().filter(|o| o.is_complete()) {
        let mut fact = manual.clone();
        if fact.timezone.as_deref().is_none_or(|tz| tz.trim().is_empty()) {
            fact.timezone = Some(DEFAULT_SOURCE_TIMEZONE.to_string());
        }
        return Some(fact);
    }

    item.broadcast
        .as_ref()
        .filter(|b| b.day().is_some())
        .cloned()
}

/// Whether the effective broadcast comes from the admin override.
#[must_use]
pub fn is_override_active(item: &CatalogItem) -> bool {
    item.broadcast_override
        .as_ref()
        .is_some_and(BroadcastFact::is_complete)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CatalogId;

    fn item() -> CatalogItem {
        CatalogItem::new(CatalogId::new(1), "Osananajimi")
    }

    #[test]
    fn override_beats_provider_broadcast() {
        let mut item = item();
        item.broadcast = Some(BroadcastFact::weekly("Friday", "09:00", "Asia/Tokyo"));
        item.broadcast_override = Some(BroadcastFact {
            day: Some("Tuesdays".to_string()),
            time: Some("20:00".to_string()),
            timezone: None,
            airing_at: None,
        });

        let effective = resolve_effective(&item).unwrap();
        assert_eq!(effective.day(), Some("Tuesdays"));
        assert_eq!(effective.time(), Some("20:00"));
        assert_eq!(effective.timezone.as_deref(), Some("Asia/Tokyo"));
        assert!(is_override_active(&item));
    }

    #[test]
    fn incomplete_override_is_ignored() {
        let mut item = item();
        item.broadcast = Some(BroadcastFact::weekly("Friday", "09:00", "Asia/Tokyo"));
        item.broadcast_override = Some(BroadcastFact {
            day: Some("Tuesdays".to_string()),
            time: Some(String::new()),
            timezone: None,
            airing_at: None,
        });

        assert_eq!(resolve_effective(&item).unwrap().day(), Some("Friday"));
        assert!(!is_override_active(&item));
    }

    #[test]
    fn provider_broadcast_returned_as_is() {
        let mut item = item();
        let stored = BroadcastFact::weekly("Mondays", "00:00", "Asia/Tokyo").with_airing_at(1_700_000_000);
        item.broadcast = Some(stored.clone());
        assert_eq!(resolve_effective(&item), Some(stored));
    }

    #[test]
    fn no_data_resolves_to_none() {
        let mut item = item();
        assert_eq!(resolve_effective(&item), None);

        item.broadcast = Some(BroadcastFact {
            day: None,
            time: Some("10:00".to_string()),
            timezone: None,
            airing_at: None,
        });
        assert_eq!(resolve_effective(&item), None);
    }

    #[test]
    fn resolution_is_idempotent() {
        let mut item = item();
        item.broadcast = Some(BroadcastFact::weekly("Friday", "09:00", "Asia/Tokyo"));
        item.broadcast_override = Some(BroadcastFact::weekly("Tuesdays", "20:00", ""));

        let first = resolve_effective(&item);
        let second = resolve_effective(&item);
        assert_eq!(first, second);
    }
}
