//! Broadcast scheduling: timezone conversion, effective-broadcast resolution
//! and the daily "airing today" selection.
//!
//! Everything in this module is synchronous and pure.

pub mod resolver;
pub mod timezone;
pub mod today;

pub use resolver::{is_override_active, resolve_effective};
pub use timezone::{
    ViewerLabel, display_time, fallback_label, infer_fact_from_timestamp, label_for_instant,
    next_occurrence_utc, to_most_recent_utc, to_viewer_local_label, utc_offset_minutes,
};
pub use today::{broadcast_is_today, select_airing_today};
