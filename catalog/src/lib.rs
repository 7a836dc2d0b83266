//! Library Catalog
//!
//! An in-memory catalog of physical books and e-books, lent out to registered
//! students and teachers.

pub mod application;
pub mod config;
pub mod console;
pub mod domain;
pub mod infrastructure;
