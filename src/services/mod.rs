pub mod catalog;
pub use catalog::{CatalogError, CatalogService, CatalogStore};

pub mod catalog_impl;

pub mod provider;
pub use provider::{MetadataProvider, ProviderError};

pub mod reconcile;
pub use reconcile::{Reconciler, record_to_patch};
