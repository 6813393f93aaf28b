//! Catalog record types

pub mod book;
pub mod todo;

pub use book::*;
pub use todo::*;
