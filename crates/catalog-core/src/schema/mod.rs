//! Declarative field schemas
//!
//! Each record kind describes its fields once, as a [`Schema`]. The same
//! description drives payload validation and query filter parsing.

pub(crate) mod validator;

pub use validator::validate;

use serde::Serialize;
use thiserror::Error;

/// Type and constraints of a single field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Free text, length counted in characters
    Text {
        min_len: usize,
        max_len: Option<usize>,
    },
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    Float {
        min: Option<f64>,
        max: Option<f64>,
    },
    Bool,
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text { .. } => "string",
            FieldKind::Integer { .. } => "integer",
            FieldKind::Float { .. } => "number",
            FieldKind::Bool => "boolean",
        }
    }
}

/// A named field with its kind and presence rule
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn text(name: &'static str, min_len: usize, max_len: Option<usize>) -> Self {
        Self {
            name,
            kind: FieldKind::Text { min_len, max_len },
            required: true,
        }
    }

    pub fn integer(name: &'static str, min: Option<i64>, max: Option<i64>) -> Self {
        Self {
            name,
            kind: FieldKind::Integer { min, max },
            required: true,
        }
    }

    pub fn float(name: &'static str, min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            name,
            kind: FieldKind::Float { min, max },
            required: true,
        }
    }

    pub fn boolean(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Bool,
            required: true,
        }
    }

    /// Mark the field as optional (may be absent or null)
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Identifier field: optional on input, unbounded. An id no record
    /// carries is a lookup miss, not a malformed payload.
    pub fn id() -> Self {
        Self::integer("id", None, None).optional()
    }
}

/// Field schema of one record kind
#[derive(Debug, Clone)]
pub struct Schema {
    pub kind: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(kind: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self { kind, fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A single failed constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.to_string(),
        }
    }
}

/// Rejected payload or query, with one entry per failing field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed: {}", summary(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}
