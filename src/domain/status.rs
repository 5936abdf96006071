//! Canonical airing status and the provider mapping tables that feed it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Internal status vocabulary, distinct from either provider's raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalStatus {
    #[default]
    Airing,
    #[serde(alias = "completed")]
    Finished,
    Upcoming,
}

impl CanonicalStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Airing => "airing",
            Self::Finished => "finished",
            Self::Upcoming => "upcoming",
        }
    }

    /// Reads a stored status string. `completed` is a legacy synonym of
    /// `finished`; anything unrecognized reads as `None`.
    #[must_use]
    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "airing" => Some(Self::Airing),
            "finished" | "completed" => Some(Self::Finished),
            "upcoming" => Some(Self::Upcoming),
            _ => None,
        }
    }

    /// Maps an AniList `MediaStatus` value.
    ///
    /// Unknown values map to `Finished`, which keeps unrecognized items out of
    /// the daily schedule.
    #[must_use]
    pub fn from_anilist(raw: &str) -> Self {
        match raw {
            "RELEASING" | "HIATUS" => Self::Airing,
            "NOT_YET_RELEASED" => Self::Upcoming,
            _ => Self::Finished,
        }
    }

    /// Maps a MyAnimeList (Jikan) status string.
    #[must_use]
    pub fn from_mal(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "currently airing" => Self::Airing,
            "not yet aired" => Self::Upcoming,
            _ => Self::Finished,
        }
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CanonicalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_stored(s).ok_or_else(|| format!("unknown status: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anilist_table() {
        assert_eq!(CanonicalStatus::from_anilist("RELEASING"), CanonicalStatus::Airing);
        assert_eq!(CanonicalStatus::from_anilist("HIATUS"), CanonicalStatus::Airing);
        assert_eq!(
            CanonicalStatus::from_anilist("NOT_YET_RELEASED"),
            CanonicalStatus::Upcoming
        );
        assert_eq!(CanonicalStatus::from_anilist("FINISHED"), CanonicalStatus::Finished);
        assert_eq!(CanonicalStatus::from_anilist("CANCELLED"), CanonicalStatus::Finished);
        assert_eq!(CanonicalStatus::from_anilist("SOMETHING"), CanonicalStatus::Finished);
    }

    #[test]
    fn mal_table() {
        assert_eq!(
            CanonicalStatus::from_mal("Currently Airing"),
            CanonicalStatus::Airing
        );
        assert_eq!(
            CanonicalStatus::from_mal("Finished Airing"),
            CanonicalStatus::Finished
        );
        assert_eq!(
            CanonicalStatus::from_mal("Not yet aired"),
            CanonicalStatus::Upcoming
        );
        assert_eq!(CanonicalStatus::from_mal(""), CanonicalStatus::Finished);
    }

    #[test]
    fn stored_strings_accept_completed() {
        assert_eq!(
            CanonicalStatus::from_stored("completed"),
            Some(CanonicalStatus::Finished)
        );
        assert_eq!(
            CanonicalStatus::from_stored("Airing"),
            Some(CanonicalStatus::Airing)
        );
        assert_eq!(CanonicalStatus::from_stored("RELEASING"), None);

        let parsed: CanonicalStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(parsed, CanonicalStatus::Finished);
    }
}
