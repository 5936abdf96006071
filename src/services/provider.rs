//! Provider abstraction used by reconciliation.

use crate::domain::ExternalIds;
use crate::models::provider::{NormalizedProviderRecord, ProviderKind};
use thiserror::Error;

/// Failures of a single metadata provider, or of all of them.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} request failed: {message}")]
    Http {
        provider: ProviderKind,
        message: String,
    },

    #[error("{provider} returned HTTP {status}")]
    Status { provider: ProviderKind, status: u16 },

    #[error("{provider} GraphQL error: {message}")]
    GraphQl {
        provider: ProviderKind,
        message: String,
    },

    #[error("{provider} response could not be decoded: {message}")]
    Decode {
        provider: ProviderKind,
        message: String,
    },

    #[error("{provider} has no entry for {id}")]
    NotFound { provider: ProviderKind, id: String },

    #[error("{provider} lookup needs an id it can use")]
    MissingId { provider: ProviderKind },

    #[error("All providers failed (primary: {primary}; fallback: {fallback})")]
    Exhausted {
        primary: Box<ProviderError>,
        fallback: Box<ProviderError>,
    },
}

impl ProviderError {
    /// Maps a reqwest failure, keeping decode errors apart from transport ones.
    pub fn from_reqwest(provider: ProviderKind, err: &reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode {
                provider,
                message: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            Self::Status {
                provider,
                status: status.as_u16(),
            }
        } else {
            Self::Http {
                provider,
                message: err.to_string(),
            }
        }
    }

    pub fn not_found(provider: ProviderKind, id: impl ToString) -> Self {
        Self::NotFound {
            provider,
            id: id.to_string(),
        }
    }

    pub fn exhausted(primary: Self, fallback: Self) -> Self {
        Self::Exhausted {
            primary: Box::new(primary),
            fallback: Box::new(fallback),
        }
    }

    /// Provider that produced the error. `None` for aggregated failures.
    #[must_use]
    pub const fn provider(&self) -> Option<ProviderKind> {
        match self {
            Self::Http { provider, .. }
            | Self::Status { provider, .. }
            | Self::GraphQl { provider, .. }
            | Self::Decode { provider, .. }
            | Self::NotFound { provider, .. }
            | Self::MissingId { provider } => Some(*provider),
            Self::Exhausted { .. } => None,
        }
    }
}

/// A metadata source that can produce a normalized record for an item.
///
/// ```rust,ignore
/// use animehub::domain::ExternalIds;
/// use animehub::services::MetadataProvider;
///
/// async fn example(provider: &dyn MetadataProvider) {
///     let record = provider.fetch(&ExternalIds::new(Some(52991), None)).await;
/// }
/// ```
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Fetches and normalizes one title.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::MissingId`] when none of the ids are usable by this provider
    /// - [`ProviderError::NotFound`] when the provider has no such title
    /// - transport, status, GraphQL and decode errors otherwise
    async fn fetch(&self, ids: &ExternalIds) -> Result<NormalizedProviderRecord, ProviderError>;
}
