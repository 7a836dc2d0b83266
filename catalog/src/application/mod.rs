pub mod identifiers;
pub mod services;

pub use identifiers::IdGenerator;
pub use services::{CatalogError, CatalogResult, CatalogService};
