//! Provider reconciliation: one normalized record per title from AniList,
//! falling back to Jikan.

use crate::domain::{CanonicalStatus, ExternalIds};
use crate::models::anime::{CatalogPatch, FieldUpdate};
use crate::models::provider::NormalizedProviderRecord;
use crate::services::provider::{MetadataProvider, ProviderError};
use std::sync::Arc;
use tracing::{info, warn};

/// Queries the primary provider first and the fallback only when needed.
///
/// The primary is expected to be AniList and the fallback Jikan, but any two
/// [`MetadataProvider`]s work.
#[derive(Clone)]
pub struct Reconciler {
    primary: Arc<dyn MetadataProvider>,
    fallback: Arc<dyn MetadataProvider>,
    parallel: bool,
}

impl Reconciler {
    #[must_use]
    pub fn new(primary: Arc<dyn MetadataProvider>, fallback: Arc<dyn MetadataProvider>) -> Self {
        Self {
            primary,
            fallback,
            parallel: false,
        }
    }

    /// Queries both providers concurrently instead of sequentially.
    #[must_use]
    pub const fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Fetches and merges provider data for a title.
    ///
    /// Falls back when the primary fails, or when it reports an airing title
    /// without any usable broadcast. In the latter case a fallback failure is
    /// not an error: the primary's record is returned without a broadcast.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Exhausted`] when both providers fail.
    pub async fn link_and_enrich(
        &self,
        mal_id: Option<i32>,
        preferred_anilist_id: Option<i32>,
    ) -> Result<NormalizedProviderRecord, ProviderError> {
        let ids = ExternalIds::new(mal_id, preferred_anilist_id);

        let record = if self.parallel {
            self.lookup_parallel(&ids).await?
        } else {
            self.lookup_sequential(&ids).await?
        };

        info!(
            source = %record.source,
            mal_id = ?record.mal_id,
            anilist_id = ?record.anilist_id,
            status = %record.status,
            has_broadcast = record.broadcast.is_some(),
            "Provider data reconciled"
        );

        Ok(record)
    }

    async fn lookup_sequential(
        &self,
        ids: &ExternalIds,
    ) -> Result<NormalizedProviderRecord, ProviderError> {
        match self.primary.fetch(ids).await {
            Ok(record) if !lacks_broadcast(&record) => Ok(record),
            Ok(record) => {
                warn!(
                    provider = %self.primary.kind(),
                    "Airing title without broadcast data, trying fallback"
                );
                let fallback_ids = ExternalIds::new(ids.mal_id.or(record.mal_id), record.anilist_id);

                match self.fallback.fetch(&fallback_ids).await {
                    Ok(fallback) => Ok(with_identity_of(fallback, &record)),
                    Err(err) => {
                        warn!(provider = %self.fallback.kind(), error = %err, "Fallback failed, keeping primary record");
                        Ok(record)
                    }
                }
            }
            Err(primary_err) => {
                warn!(
                    provider = %self.primary.kind(),
                    error = %primary_err,
                    "Primary provider failed, trying fallback"
                );
                self.fallback
                    .fetch(ids)
                    .await
                    .map_err(|fallback_err| ProviderError::exhausted(primary_err, fallback_err))
            }
        }
    }

    async fn lookup_parallel(
        &self,
        ids: &ExternalIds,
    ) -> Result<NormalizedProviderRecord, ProviderError> {
        let (primary, fallback) = tokio::join!(self.primary.fetch(ids), self.fallback.fetch(ids));

        match (primary, fallback) {
            (Ok(record), Ok(fallback)) if lacks_broadcast(&record) => {
                Ok(with_identity_of(fallback, &record))
            }
            (Ok(record), _) => Ok(record),
            (Err(primary_err), Ok(fallback)) => {
                warn!(
                    provider = %self.primary.kind(),
                    error = %primary_err,
                    "Primary provider failed, using fallback"
                );
                Ok(fallback)
            }
            (Err(primary_err), Err(fallback_err)) => {
                Err(ProviderError::exhausted(primary_err, fallback_err))
            }
        }
    }
}

fn lacks_broadcast(record: &NormalizedProviderRecord) -> bool {
    record.status == CanonicalStatus::Airing && record.broadcast.is_none()
}

/// Fallback data with the primary's ids filled in where the fallback has none.
fn with_identity_of(
    mut fallback: NormalizedProviderRecord,
    primary: &NormalizedProviderRecord,
) -> NormalizedProviderRecord {
    fallback.anilist_id = fallback.anilist_id.or(primary.anilist_id);
    fallback.mal_id = fallback.mal_id.or(primary.mal_id);
    fallback
}

/// Catalog fields written by a (re-)link.
///
/// The broadcast is replaced or cleared, never merged. The admin override and
/// the title are left alone.
#[must_use]
pub fn record_to_patch(record: &NormalizedProviderRecord) -> CatalogPatch {
    CatalogPatch {
        status: Some(record.status),
        mal_id: record.mal_id,
        anilist_id: record.anilist_id,
        broadcast: FieldUpdate::from(record.broadcast.clone()),
        schedule_active: (!record.schedule_active).then_some(false),
        ..CatalogPatch::default()
    }
}
