pub mod anime;
pub mod broadcast;
pub mod provider;

pub use anime::{CatalogItem, CatalogPatch, FieldUpdate, NewCatalogItem};
pub use broadcast::{BroadcastFact, BroadcastSlot};
pub use provider::{NextAiring, NormalizedProviderRecord, ProviderKind, SearchResult};
