pub use super::catalog_items::Entity as CatalogItems;
