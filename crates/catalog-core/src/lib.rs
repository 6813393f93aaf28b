//! Catalog Core Library
//!
//! Record types, field schemas, payload validation, query filters and the
//! storage port shared by every catalog backend.

pub mod error;
pub mod filter;
pub mod ports;
pub mod record;
pub mod schema;
pub mod types;

pub use error::{CatalogError, Result};
pub use filter::{Filter, Predicate};
pub use ports::RecordStore;
pub use record::{FieldValue, Record};
pub use schema::{validate, FieldError, FieldKind, FieldSpec, Schema, ValidationError};
pub use types::{Book, Todo};
