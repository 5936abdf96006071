//! Domain types for the catalog with strong typing.
//!
//! Provider vocabularies (status strings, weekday spellings) are mapped into
//! the closed types defined here at the boundary, so scheduling logic never
//! compares raw strings.

pub mod status;
pub mod weekday;

pub use status::CanonicalStatus;
pub use weekday::{parse_weekday, plural_weekday_name, weekday_name};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a catalog item.
///
/// This newtype wrapper keeps catalog ids apart from external provider ids
/// (`malId`, `anilistId`), which are plain integers on the wire.
///
/// # Examples
///
/// ```rust
/// use animehub::domain::CatalogId;
///
/// let id = CatalogId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CatalogId(i32);

impl CatalogId {
    /// Creates a new `CatalogId` from a raw i32 value.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `id` is negative.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "CatalogId should be non-negative");
        Self(id)
    }

    /// Returns the underlying i32 value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CatalogId> for i32 {
    fn from(id: CatalogId) -> Self {
        id.0
    }
}

impl From<i32> for CatalogId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Serialize for CatalogId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for CatalogId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i32::deserialize(deserializer)?;
        if id < 0 {
            return Err(serde::de::Error::custom(format!(
                "catalog id must be non-negative, got {id}"
            )));
        }
        Ok(Self(id))
    }
}

/// External keys into the two metadata providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExternalIds {
    pub mal_id: Option<i32>,
    pub anilist_id: Option<i32>,
}

impl ExternalIds {
    #[must_use]
    pub const fn new(mal_id: Option<i32>, anilist_id: Option<i32>) -> Self {
        Self { mal_id, anilist_id }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mal_id.is_none() && self.anilist_id.is_none()
    }
}
