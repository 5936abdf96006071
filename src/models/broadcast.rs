use crate::constants::schedule::DEFAULT_SOURCE_TIMEZONE;
use crate::domain::parse_weekday;
use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Weekly broadcast description, as stored in the catalog.
///
/// Fields stay raw strings because the catalog may hold stale or hand-edited
/// records. Use [`BroadcastFact::slot`] to get the validated form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastFact {
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    /// Exact unix timestamp (seconds) of a real occurrence. Only AniList
    /// supplies this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airing_at: Option<i64>,
}

/// A broadcast fact after boundary validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastSlot {
    pub weekday: Weekday,
    pub hour: u32,
    pub minute: u32,
    pub timezone: Tz,
}

impl BroadcastFact {
    pub fn weekly(day: impl Into<String>, time: impl Into<String>, timezone: impl Into<String>) -> Self {
        Self {
            day: Some(day.into()),
            time: Some(time.into()),
            timezone: Some(timezone.into()),
            airing_at: None,
        }
    }

    #[must_use]
    pub fn with_airing_at(mut self, airing_at: i64) -> Self {
        self.airing_at = Some(airing_at);
        self
    }

    #[must_use]
    pub fn day(&self) -> Option<&str> {
        non_blank(self.day.as_deref())
    }

    #[must_use]
    pub fn time(&self) -> Option<&str> {
        non_blank(self.time.as_deref())
    }

    /// Timezone name, with the default source zone for blank values.
    #[must_use]
    pub fn timezone_name(&self) -> &str {
        non_blank(self.timezone.as_deref()).unwrap_or(DEFAULT_SOURCE_TIMEZONE)
    }

    /// Both `day` and `time` are non-empty. A fact missing either is absent.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.day().is_some() && self.time().is_some()
    }

    /// Parses the weekly part. `None` when the day, time or zone is missing
    /// or malformed.
    #[must_use]
    pub fn slot(&self) -> Option<BroadcastSlot> {
        let weekday = parse_weekday(self.day()?)?;
        let (hour, minute) = parse_clock(self.time()?)?;
        let timezone = self.timezone_name().parse::<Tz>().ok()?;

        Some(BroadcastSlot {
            weekday,
            hour,
            minute,
            timezone,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parses `H:MM` or `HH:MM` (24h clock).
#[must_use]
pub fn parse_clock(raw: &str) -> Option<(u32, u32)> {
    let (h, m) = raw.trim().split_once(':')?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return None;
    }
    let hour: u32 = h.parse().ok()?;
    let minute: u32 = m.parse().ok()?;
    (hour < 24 && minute < 60).then_some((hour, minute))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_clock_accepts_common_forms() {
        assert_eq!(parse_clock("00:00"), Some((0, 0)));
        assert_eq!(parse_clock("23:30"), Some((23, 30)));
        assert_eq!(parse_clock("9:05"), Some((9, 5)));
        assert_eq!(parse_clock(" 20:00 "), Some((20, 0)));
    }

    #[test]
    fn parse_clock_rejects_garbage() {
        assert_eq!(parse_clock(""), None);
        assert_eq!(parse_clock("24:00"), None);
        assert_eq!(parse_clock("12:60"), None);
        assert_eq!(parse_clock("noon"), None);
        assert_eq!(parse_clock("12:5"), None);
        assert_eq!(parse_clock("-1:00"), None);
    }

    #[test]
    fn slot_defaults_timezone() {
        let fact = BroadcastFact {
            day: Some("Saturdays".to_string()),
            time: Some("17:00".to_string()),
            timezone: None,
            airing_at: None,
        };
        let slot = fact.slot().unwrap();
        assert_eq!(slot.weekday, Weekday::Sat);
        assert_eq!((slot.hour, slot.minute), (17, 0));
        assert_eq!(slot.timezone, chrono_tz::Asia::Tokyo);
    }

    #[test]
    fn slot_rejects_unknown_zone() {
        let fact = BroadcastFact::weekly("Monday", "10:00", "Mars/Olympus");
        assert!(fact.slot().is_none());
    }

    #[test]
    fn blank_fields_are_incomplete() {
        let fact = BroadcastFact::weekly("  ", "10:00", "Asia/Tokyo");
        assert!(!fact.is_complete());
        assert!(fact.slot().is_none());
    }

    #[test]
    fn deserializes_provider_shape() {
        let json = r#"{"day":"Tuesdays","time":"23:30","timezone":"Asia/Tokyo","airingAt":1700000000}"#;
        let fact: BroadcastFact = serde_json::from_str(json).unwrap();
        assert_eq!(fact.day(), Some("Tuesdays"));
        assert_eq!(fact.airing_at, Some(1_700_000_000));

        let partial: BroadcastFact = serde_json::from_str(r#"{"day":"Friday"}"#).unwrap();
        assert!(!partial.is_complete());
    }
}
