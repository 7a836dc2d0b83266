// Domain layer module
pub mod base;
pub mod validation;
pub mod value_objects;
pub mod entities;
pub mod aggregates;

pub use base::*;
pub use value_objects::*;
pub use entities::*;
pub use aggregates::*;
