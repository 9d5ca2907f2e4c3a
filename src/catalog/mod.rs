//! Policy catalog data structures, indexing, and master-data loading

mod data;
mod index;
pub mod loader;

pub use data::{BoundValue, PolicyVariant, SumAssuredLimit};
pub use index::PolicyCatalog;
pub use loader::{load_catalog, load_catalog_from_reader, load_default_catalog, CatalogError};

#[cfg(test)]
pub(crate) use data::test_support;
