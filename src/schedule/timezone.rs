//! Conversion between weekly broadcast descriptions and concrete instants.
//!
//! Nothing here consults the process timezone. The source zone comes from the
//! broadcast fact and the viewer zone from the `DateTime<Z>` passed in.

use crate::constants::schedule::DEFAULT_SOURCE_LABEL;
use crate::domain::{plural_weekday_name, weekday_name};
use crate::models::broadcast::BroadcastFact;
use chrono::{DateTime, Datelike, NaiveDate, Offset, TimeDelta, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::Serialize;
use std::fmt::Display;

/// Broadcast rendered in the viewer's zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewerLabel {
    pub day_name: String,
    pub time: String,
    pub tz_label: String,
}

/// UTC offset of `tz` at `instant`, in minutes (positive east of UTC).
///
/// Recomputed for every instant so daylight-saving transitions are honored.
#[must_use]
pub fn utc_offset_minutes(tz: &Tz, instant: &DateTime<Utc>) -> i64 {
    let seconds = tz
        .offset_from_utc_datetime(&instant.naive_utc())
        .fix()
        .local_minus_utc();
    i64::from(seconds) / 60
}

/// Interprets a wall-clock time on `date` in `tz` as a UTC instant.
///
/// The wall clock is first read as UTC, then corrected by the zone's offset at
/// that provisional instant.
fn wall_clock_to_utc(tz: &Tz, date: NaiveDate, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    let provisional = date.and_hms_opt(hour, minute, 0)?.and_utc();
    let offset = utc_offset_minutes(tz, &provisional);
    provisional.checked_sub_signed(TimeDelta::minutes(offset))
}

fn days_between(from: Weekday, to: Weekday) -> i64 {
    i64::from(to.num_days_from_sunday()) - i64::from(from.num_days_from_sunday())
}

fn instant_from_timestamp(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(seconds, 0)
}

/// Resolves a broadcast fact to its most recent occurrence at or before
/// today, in the fact's source timezone.
///
/// A fact missing its day or time resolves to `None`, even when it carries
/// an `airing_at`. An exact `airing_at` on a complete fact wins outright.
/// Otherwise the day offset from the
/// current source-zone weekday is kept in `[-6, 0]`, so a slot later today
/// still resolves to today.
///
/// Returns `None` when the weekday, time or timezone cannot be parsed.
#[must_use]
pub fn to_most_recent_utc(fact: &BroadcastFact, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if !fact.is_complete() {
        return None;
    }

    if let Some(airing_at) = fact.airing_at {
        return instant_from_timestamp(airing_at);
    }

    let slot = fact.slot()?;
    let now_in_source = now.with_timezone(&slot.timezone);

    let mut days_offset = days_between(now_in_source.weekday(), slot.weekday);
    if days_offset > 0 {
        days_offset -= 7;
    }

    let today_at_slot = wall_clock_to_utc(
        &slot.timezone,
        now_in_source.date_naive(),
        slot.hour,
        slot.minute,
    )?;

    today_at_slot.checked_add_signed(TimeDelta::days(days_offset))
}

/// Next occurrence strictly after `now`, for "next episode" displays.
///
/// A future `airing_at` is returned as-is. A past one falls back to the
/// weekly day/time pattern.
#[must_use]
pub fn next_occurrence_utc(fact: &BroadcastFact, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if !fact.is_complete() {
        return None;
    }

    if let Some(instant) = fact.airing_at.and_then(instant_from_timestamp)
        && instant > now
    {
        return Some(instant);
    }

    let slot = fact.slot()?;
    let now_in_source = now.with_timezone(&slot.timezone);

    let mut days_until = days_between(now_in_source.weekday(), slot.weekday);
    let slot_reached = (now_in_source.hour(), now_in_source.minute()) >= (slot.hour, slot.minute);
    if days_until < 0 || (days_until == 0 && slot_reached) {
        days_until += 7;
    }

    let date = now_in_source
        .date_naive()
        .checked_add_signed(TimeDelta::days(days_until))?;

    wall_clock_to_utc(&slot.timezone, date, slot.hour, slot.minute)
}

/// Renders the broadcast in the viewer's zone.
///
/// Presentation only: filtering decisions use the instant, never this label.
pub fn to_viewer_local_label<Z>(fact: &BroadcastFact, viewer_now: &DateTime<Z>) -> Option<ViewerLabel>
where
    Z: TimeZone,
    Z::Offset: Display,
{
    let instant = to_most_recent_utc(fact, viewer_now.with_timezone(&Utc))?;
    Some(label_for_instant(&instant, &viewer_now.timezone()))
}

pub fn label_for_instant<Z>(instant: &DateTime<Utc>, zone: &Z) -> ViewerLabel
where
    Z: TimeZone,
    Z::Offset: Display,
{
    let local = instant.with_timezone(zone);
    ViewerLabel {
        day_name: weekday_name(local.weekday()).to_string(),
        time: local.format("%H:%M").to_string(),
        tz_label: local.format("%Z").to_string(),
    }
}

/// Unconverted display string, e.g. `"23:30 (Asia/Tokyo)"`. Empty when the
/// fact has no time.
#[must_use]
pub fn fallback_label(fact: &BroadcastFact) -> String {
    let zone = fact
        .timezone
        .as_deref()
        .map(str::trim)
        .filter(|z| !z.is_empty())
        .unwrap_or(DEFAULT_SOURCE_LABEL);

    fact.time()
        .map(|time| format!("{time} ({zone})"))
        .unwrap_or_default()
}

/// `"HH:MM (TZ)"` in the viewer's zone, degrading to [`fallback_label`].
pub fn display_time<Z>(fact: &BroadcastFact, viewer_now: &DateTime<Z>) -> String
where
    Z: TimeZone,
    Z::Offset: Display,
{
    to_viewer_local_label(fact, viewer_now).map_or_else(
        || fallback_label(fact),
        |label| format!("{} ({})", label.time, label.tz_label),
    )
}

/// Derives the weekly fact for an exact airing instant, keeping the instant.
#[must_use]
pub fn infer_fact_from_timestamp(airing_at: i64, source: Tz) -> Option<BroadcastFact> {
    let local = instant_from_timestamp(airing_at)?.with_timezone(&source);

    Some(BroadcastFact {
        day: Some(plural_weekday_name(local.weekday()).to_string()),
        time: Some(local.format("%H:%M").to_string()),
        timezone: Some(source.name().to_string()),
        airing_at: Some(airing_at),
    })
}
