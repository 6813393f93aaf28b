//! Record trait implemented by every collection item

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::schema::Schema;

/// Borrowed view of one field, used by query filters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

/// An entity held by a [`RecordStore`](crate::ports::RecordStore)
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Singular name, used in logs and error messages
    const KIND: &'static str;

    fn schema() -> &'static Schema;

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    /// Field lookup by schema name. `None` for absent optional fields.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}
