//! Todo records

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::record::{FieldValue, Record};
use crate::schema::{FieldSpec, Schema};

static TODO_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        Todo::KIND,
        vec![
            FieldSpec::id(),
            FieldSpec::text("title", 3, None),
            FieldSpec::text("description", 3, Some(100)),
            FieldSpec::integer("priority", Some(1), Some(5)),
            FieldSpec::boolean("complete"),
        ],
    )
});

/// A todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: i64,
    pub complete: bool,
}

impl Record for Todo {
    const KIND: &'static str = "todo";

    fn schema() -> &'static Schema {
        &TODO_SCHEMA
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Integer(self.id)),
            "title" => Some(FieldValue::Text(&self.title)),
            "description" => Some(FieldValue::Text(&self.description)),
            "priority" => Some(FieldValue::Integer(self.priority)),
            "complete" => Some(FieldValue::Bool(self.complete)),
            _ => None,
        }
    }
}
