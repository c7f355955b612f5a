//! Book records and the catalog that holds them.

pub mod book;
pub mod catalog;

pub use book::{Book, Reviews};
pub use catalog::Catalog;
